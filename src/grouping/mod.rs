pub mod assembler;
pub mod groups;
pub mod iot;

pub use assembler::{assemble, Assembly};
pub use groups::{
    ChannelSensors, DecodeOutcome, DeviceData, DeviceInfo, LightningData, RainData,
    SensorDiagnostics, SensorHealth, WeatherData,
};
pub use iot::{scan_iot_devices, IoTDevice, IotModel, IotScan};
