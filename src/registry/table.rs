//! Static key tables for the weather station push protocol.
//!
//! Fixed keys are looked up verbatim. Channel keys follow the
//! `<prefix><index><suffix>` shape, with the index running from 1 up to the
//! family's `max_channel`.

use crate::models::DisplayGroup as G;
use crate::models::QuantityKind as K;
use crate::models::Unit as U;

/// Highest channel index any family accepts.
pub const MAX_CHANNEL: u8 = 16;

#[derive(Debug)]
pub struct KeySpec {
    pub key: &'static str,
    pub sensor: &'static str,
    pub label: &'static str,
    pub kind: K,
    pub unit: U,
    pub group: G,
}

#[derive(Debug)]
pub struct ChannelSpec {
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub max_channel: u8,
    pub sensor: &'static str,
    pub label: &'static str,
    pub kind: K,
    pub unit: U,
    pub group: G,
}

const fn primary(
    key: &'static str,
    sensor: &'static str,
    label: &'static str,
    kind: K,
    unit: U,
) -> KeySpec {
    KeySpec {
        key,
        sensor,
        label,
        kind,
        unit,
        group: G::Primary,
    }
}

const fn diagnostic(
    key: &'static str,
    sensor: &'static str,
    label: &'static str,
    kind: K,
    unit: U,
) -> KeySpec {
    KeySpec {
        key,
        sensor,
        label,
        kind,
        unit,
        group: G::Diagnostic,
    }
}

const fn meta(
    key: &'static str,
    sensor: &'static str,
    label: &'static str,
    kind: K,
    unit: U,
) -> KeySpec {
    KeySpec {
        key,
        sensor,
        label,
        kind,
        unit,
        group: G::DeviceMeta,
    }
}

const fn channel(
    prefix: &'static str,
    suffix: &'static str,
    max_channel: u8,
    sensor: &'static str,
    label: &'static str,
    kind: K,
    unit: U,
) -> ChannelSpec {
    ChannelSpec {
        prefix,
        suffix,
        max_channel,
        sensor,
        label,
        kind,
        unit,
        group: G::Channel,
    }
}

const fn channel_diagnostic(
    prefix: &'static str,
    suffix: &'static str,
    max_channel: u8,
    sensor: &'static str,
    label: &'static str,
    kind: K,
    unit: U,
) -> ChannelSpec {
    ChannelSpec {
        prefix,
        suffix,
        max_channel,
        sensor,
        label,
        kind,
        unit,
        group: G::Diagnostic,
    }
}

#[rustfmt::skip]
pub static FIXED_KEYS: &[KeySpec] = &[
    // Pressure
    primary("baromabshpa", "absolute_pressure", "Absolute Pressure", K::Pressure, U::Hectopascal),
    primary("baromrelhpa", "relative_pressure", "Relative Pressure", K::Pressure, U::Hectopascal),
    primary("baromabsin", "absolute_pressure", "Absolute Pressure", K::Pressure, U::InchOfMercury),
    primary("baromrelin", "relative_pressure", "Relative Pressure", K::Pressure, U::InchOfMercury),
    primary("vpd", "vapour_pressure_deficit", "Vapour Pressure Deficit", K::Pressure, U::InchOfMercury),

    // Tipping bucket rain
    primary("rainratein", "rain_rate", "Rain Rate", K::RainRate, U::InchPerHour),
    primary("rainratemm", "rain_rate", "Rain Rate", K::RainRate, U::MillimeterPerHour),
    primary("eventrainin", "event_rain", "Event Rain", K::RainAccumulated, U::Inch),
    primary("eventrainmm", "event_rain", "Event Rain", K::RainAccumulated, U::Millimeter),
    primary("hourlyrainin", "hourly_rain", "Hourly Rain", K::RainAccumulated, U::Inch),
    primary("hourlyrainmm", "hourly_rain", "Hourly Rain", K::RainAccumulated, U::Millimeter),
    primary("dailyrainin", "daily_rain", "Daily Rain", K::RainAccumulated, U::Inch),
    primary("dailyrainmm", "daily_rain", "Daily Rain", K::RainAccumulated, U::Millimeter),
    primary("weeklyrainin", "weekly_rain", "Weekly Rain", K::RainAccumulated, U::Inch),
    primary("weeklyrainmm", "weekly_rain", "Weekly Rain", K::RainAccumulated, U::Millimeter),
    primary("monthlyrainin", "monthly_rain", "Monthly Rain", K::RainAccumulated, U::Inch),
    primary("monthlyrainmm", "monthly_rain", "Monthly Rain", K::RainAccumulated, U::Millimeter),
    primary("yearlyrainin", "yearly_rain", "Yearly Rain", K::RainAccumulated, U::Inch),
    primary("yearlyrainmm", "yearly_rain", "Yearly Rain", K::RainAccumulated, U::Millimeter),
    primary("totalrainin", "total_rain", "Total Rain", K::RainAccumulated, U::Inch),
    primary("totalrainmm", "total_rain", "Total Rain", K::RainAccumulated, U::Millimeter),

    // Piezo rain
    primary("rrain_piezo", "piezo_rain_rate", "Rain Rate Piezo", K::RainRate, U::InchPerHour),
    primary("rrain_piezomm", "piezo_rain_rate", "Rain Rate Piezo", K::RainRate, U::MillimeterPerHour),
    primary("erain_piezo", "piezo_event_rain", "Event Rain Piezo", K::RainAccumulated, U::Inch),
    primary("erain_piezomm", "piezo_event_rain", "Event Rain Piezo", K::RainAccumulated, U::Millimeter),
    primary("hrain_piezo", "piezo_hourly_rain", "Hourly Rain Piezo", K::RainAccumulated, U::Inch),
    primary("hrain_piezomm", "piezo_hourly_rain", "Hourly Rain Piezo", K::RainAccumulated, U::Millimeter),
    primary("drain_piezo", "piezo_daily_rain", "Daily Rain Piezo", K::RainAccumulated, U::Inch),
    primary("drain_piezomm", "piezo_daily_rain", "Daily Rain Piezo", K::RainAccumulated, U::Millimeter),
    primary("wrain_piezo", "piezo_weekly_rain", "Weekly Rain Piezo", K::RainAccumulated, U::Inch),
    primary("wrain_piezomm", "piezo_weekly_rain", "Weekly Rain Piezo", K::RainAccumulated, U::Millimeter),
    primary("mrain_piezo", "piezo_monthly_rain", "Monthly Rain Piezo", K::RainAccumulated, U::Inch),
    primary("mrain_piezomm", "piezo_monthly_rain", "Monthly Rain Piezo", K::RainAccumulated, U::Millimeter),
    primary("yrain_piezo", "piezo_yearly_rain", "Yearly Rain Piezo", K::RainAccumulated, U::Inch),
    primary("yrain_piezomm", "piezo_yearly_rain", "Yearly Rain Piezo", K::RainAccumulated, U::Millimeter),
    primary("srain_piezo", "piezo_rain_state", "Rain State Piezo", K::Boolean, U::None),

    // Humidity
    primary("humidity", "humidity", "Humidity", K::Humidity, U::Percent),
    primary("humidityin", "indoor_humidity", "Indoor Humidity", K::Humidity, U::Percent),

    // Wind
    primary("winddir", "wind_direction", "Wind Direction", K::RawNumeric, U::Degree),
    primary("winddir_avg10m", "wind_direction_avg10m", "Wind Direction 10m Avg", K::RawNumeric, U::Degree),
    primary("windspeedkmh", "wind_speed", "Wind Speed", K::Speed, U::KilometerPerHour),
    primary("windspeedmph", "wind_speed", "Wind Speed", K::Speed, U::MilePerHour),
    primary("windspdkmh_avg10m", "wind_speed_avg10m", "Wind Speed 10m Avg", K::Speed, U::KilometerPerHour),
    primary("windspdmph_avg10m", "wind_speed_avg10m", "Wind Speed 10m Avg", K::Speed, U::MilePerHour),
    primary("windgustkmh", "wind_gust", "Wind Gust", K::Speed, U::KilometerPerHour),
    primary("windgustmph", "wind_gust", "Wind Gust", K::Speed, U::MilePerHour),
    primary("maxdailygustkmh", "max_daily_gust", "Max Daily Gust", K::Speed, U::KilometerPerHour),
    primary("maxdailygust", "max_daily_gust", "Max Daily Gust", K::Speed, U::MilePerHour),

    // Temperature
    primary("tempc", "temperature", "Outdoor Temperature", K::Temperature, U::Celsius),
    primary("tempf", "temperature", "Outdoor Temperature", K::Temperature, U::Fahrenheit),
    primary("tempinc", "indoor_temperature", "Indoor Temperature", K::Temperature, U::Celsius),
    primary("tempinf", "indoor_temperature", "Indoor Temperature", K::Temperature, U::Fahrenheit),
    primary("tempfeelsc", "feels_like", "Feels like Temperature", K::Temperature, U::Celsius),
    primary("tempfeelsf", "feels_like", "Feels like Temperature", K::Temperature, U::Fahrenheit),
    primary("dewpointc", "dew_point", "Dewpoint", K::Temperature, U::Celsius),
    primary("dewpointf", "dew_point", "Dewpoint", K::Temperature, U::Fahrenheit),
    primary("dewpointinc", "indoor_dew_point", "Indoor Dewpoint", K::Temperature, U::Celsius),
    primary("dewpointinf", "indoor_dew_point", "Indoor Dewpoint", K::Temperature, U::Fahrenheit),
    primary("windchillc", "wind_chill", "Windchill", K::Temperature, U::Celsius),
    primary("windchillf", "wind_chill", "Windchill", K::Temperature, U::Fahrenheit),

    // Solar
    primary("solarradiation", "solar_radiation", "Solar Radiation", K::Radiation, U::WattPerSquareMeter),
    primary("solarradiation_lux", "solar_illuminance", "Solar Lux", K::Radiation, U::Lux),
    primary("uv", "uv_index", "UV Index", K::RawNumeric, U::UvIndex),

    // Lightning
    primary("lightning", "lightning_distance", "Lightning strike distance", K::Distance, U::Kilometer),
    primary("lightning_mi", "lightning_distance", "Lightning strike distance", K::Distance, U::Mile),
    primary("lightning_num", "lightning_count", "Lightning strikes", K::RawNumeric, U::Count),
    primary("lightning_time", "lightning_time", "Last Lightning strike", K::Timestamp, U::None),

    // Console and WH45/WH46 air quality
    primary("co2in", "indoor_co2", "Console CO2", K::Concentration, U::PartsPerMillion),
    primary("co2in_24h", "indoor_co2_24h", "Console CO2 24h average", K::Concentration, U::PartsPerMillion),
    primary("co2", "co2", "WH45 CO2", K::Concentration, U::PartsPerMillion),
    primary("co2_24h", "co2_24h", "WH45 CO2 24h average", K::Concentration, U::PartsPerMillion),
    primary("tf_co2", "co2_sensor_temperature", "WH45 Temperature", K::Temperature, U::Fahrenheit),
    primary("tf_co2c", "co2_sensor_temperature", "WH45 Temperature", K::Temperature, U::Celsius),
    primary("humi_co2", "co2_sensor_humidity", "WH45 Humidity", K::Humidity, U::Percent),
    primary("pm1_co2", "pm1", "WH46 PM1 CO2", K::Concentration, U::MicrogramPerCubicMeter),
    primary("pm1_24h_co2", "pm1_24h", "WH46 PM1 CO2 24h average", K::Concentration, U::MicrogramPerCubicMeter),
    primary("pm4_co2", "pm4", "WH46 PM4 CO2", K::Concentration, U::MicrogramPerCubicMeter),
    primary("pm4_24h_co2", "pm4_24h", "WH46 PM4 CO2 24h average", K::Concentration, U::MicrogramPerCubicMeter),
    primary("pm25_co2", "pm25", "WH45 PM2.5 CO2", K::Concentration, U::MicrogramPerCubicMeter),
    primary("pm25_24h_co2", "pm25_24h", "WH45 PM2.5 CO2 24h average", K::Concentration, U::MicrogramPerCubicMeter),
    primary("pm10_co2", "pm10", "WH45 PM10 CO2", K::Concentration, U::MicrogramPerCubicMeter),
    primary("pm10_24h_co2", "pm10_24h", "WH45 PM10 CO2 24h average", K::Concentration, U::MicrogramPerCubicMeter),

    // Batteries and capacitors
    diagnostic("co2_batt", "wh45", "WH45 Battery", K::BatteryLevel, U::BatteryBars),
    diagnostic("console_batt", "console", "Console Battery", K::BatteryLevel, U::Volt),
    diagnostic("wh25batt", "wh25", "WH25 Battery", K::BatteryBinary, U::None),
    diagnostic("wh26batt", "wh26", "WH26 Battery", K::BatteryBinary, U::None),
    diagnostic("wh40batt", "wh40", "WH40 Battery", K::BatteryLevel, U::Volt),
    diagnostic("wh57batt", "wh57", "WH57 Battery", K::BatteryLevel, U::BatteryBars),
    diagnostic("wh65batt", "wh65", "WH65 Battery", K::BatteryBinary, U::None),
    diagnostic("wh68batt", "wh68", "WH68 Battery", K::BatteryLevel, U::Volt),
    diagnostic("wh80batt", "wh80", "WH80 Battery", K::BatteryLevel, U::Volt),
    diagnostic("wh85batt", "wh85", "WH85 Battery", K::BatteryLevel, U::Volt),
    diagnostic("wh90batt", "wh90", "WH90 Battery", K::BatteryLevel, U::Volt),
    diagnostic("ws85cap_volt", "wh85", "WH85 Capacitor", K::Voltage, U::Volt),
    diagnostic("ws90cap_volt", "wh90", "WH90 Capacitor", K::Voltage, U::Volt),

    // Radio quality as reported by the local query API
    diagnostic("wh25_rssi", "wh25", "WH25 RSSI", K::SignalStrength, U::DecibelMilliwatt),
    diagnostic("wh26_rssi", "wh26", "WH26 RSSI", K::SignalStrength, U::DecibelMilliwatt),
    diagnostic("wh40_rssi", "wh40", "WH40 RSSI", K::SignalStrength, U::DecibelMilliwatt),
    diagnostic("wh45_rssi", "wh45", "WH45 RSSI", K::SignalStrength, U::DecibelMilliwatt),
    diagnostic("wh57_rssi", "wh57", "WH57 RSSI", K::SignalStrength, U::DecibelMilliwatt),
    diagnostic("wh68_rssi", "wh68", "WH68 RSSI", K::SignalStrength, U::DecibelMilliwatt),
    diagnostic("wh69_rssi", "wh69", "WH69 RSSI", K::SignalStrength, U::DecibelMilliwatt),
    diagnostic("wh80_rssi", "wh80", "WH80 RSSI", K::SignalStrength, U::DecibelMilliwatt),
    diagnostic("wh85_rssi", "wh85", "WH85 RSSI", K::SignalStrength, U::DecibelMilliwatt),
    diagnostic("wh90_rssi", "wh90", "WH90 RSSI", K::SignalStrength, U::DecibelMilliwatt),
    diagnostic("wh25_signal", "wh25", "WH25 Signal", K::SignalStrength, U::SignalBars),
    diagnostic("wh26_signal", "wh26", "WH26 Signal", K::SignalStrength, U::SignalBars),
    diagnostic("wh40_signal", "wh40", "WH40 Signal", K::SignalStrength, U::SignalBars),
    diagnostic("wh45_signal", "wh45", "WH45 Signal", K::SignalStrength, U::SignalBars),
    diagnostic("wh57_signal", "wh57", "WH57 Signal", K::SignalStrength, U::SignalBars),
    diagnostic("wh68_signal", "wh68", "WH68 Signal", K::SignalStrength, U::SignalBars),
    diagnostic("wh69_signal", "wh69", "WH69 Signal", K::SignalStrength, U::SignalBars),
    diagnostic("wh80_signal", "wh80", "WH80 Signal", K::SignalStrength, U::SignalBars),
    diagnostic("wh85_signal", "wh85", "WH85 Signal", K::SignalStrength, U::SignalBars),
    diagnostic("wh90_signal", "wh90", "WH90 Signal", K::SignalStrength, U::SignalBars),

    // Station metadata
    meta("PASSKEY", "identifier", "Station Passkey", K::RawString, U::None),
    meta("mac", "identifier", "MAC Address", K::RawString, U::None),
    meta("model", "name", "Model", K::RawString, U::None),
    meta("devname", "name", "Device Name", K::RawString, U::None),
    meta("stationtype", "firmware", "Station Type", K::RawString, U::None),
    meta("ver", "firmware", "Firmware Version", K::RawString, U::None),
    meta("freq", "frequency", "Radio Frequency", K::RawString, U::None),
    meta("dateutc", "observed_at", "Observation Time", K::Timestamp, U::None),
    meta("ws90_ver", "wh90_firmware", "WH90 Firmware", K::RawString, U::None),
    meta("runtime", "runtime", "Runtime", K::RawNumeric, U::Second),
    meta("interval", "interval", "Upload Interval", K::RawNumeric, U::Second),
    meta("heap", "heap", "Memory heap", K::RawNumeric, U::Count),
    meta("fields", "fields", "Field list", K::RawString, U::None),
];

#[rustfmt::skip]
pub static CHANNEL_KEYS: &[ChannelSpec] = &[
    // Thermo-hygrometers
    channel("temp", "f", 8, "temperature", "Temperature", K::Temperature, U::Fahrenheit),
    channel("temp", "c", 8, "temperature", "Temperature", K::Temperature, U::Celsius),
    channel("humidity", "", 8, "humidity", "Humidity", K::Humidity, U::Percent),
    channel("dewpoint", "f", 8, "dew_point", "Dewpoint", K::Temperature, U::Fahrenheit),
    channel("dewpoint", "c", 8, "dew_point", "Dewpoint", K::Temperature, U::Celsius),

    // Soil
    channel("soilmoisture", "", 16, "soil_moisture", "Soil Moisture", K::Humidity, U::Percent),
    channel("soilad", "", 16, "soil_ad", "Soil AD", K::RawNumeric, U::Count),
    channel("tf_ch", "", 8, "soil_temperature", "Soil Temperature", K::Temperature, U::Fahrenheit),
    channel("tf_ch", "c", 8, "soil_temperature", "Soil Temperature", K::Temperature, U::Celsius),

    // Air quality
    channel("pm25_ch", "", 4, "pm25", "PM2.5", K::Concentration, U::MicrogramPerCubicMeter),
    channel("pm25_avg_24h_ch", "", 4, "pm25_24h", "PM2.5 24h Average", K::Concentration, U::MicrogramPerCubicMeter),

    // Leak, leaf wetness and laser distance
    channel("leak_ch", "", 4, "leak", "Leak Detection", K::Boolean, U::None),
    channel("leafwetness_ch", "", 8, "leaf_wetness", "Leaf Wetness", K::Humidity, U::Percent),
    channel("depth_ch", "", 4, "lds_depth", "Current Depth", K::Distance, U::Millimeter),
    channel("thi_ch", "", 4, "lds_total_height", "Total Historical Depth Index", K::Distance, U::Millimeter),
    channel("air_ch", "", 4, "lds_air_gap", "Air Gap", K::Distance, U::Millimeter),
    channel("ldsheat_ch", "", 4, "lds_heater_count", "Heater-on Counter", K::RawNumeric, U::Count),

    // Channel sensor batteries
    channel_diagnostic("batt", "", 8, "wh31", "Battery", K::BatteryBinary, U::None),
    channel_diagnostic("soilbatt", "", 16, "wh51", "Soil Battery", K::BatteryLevel, U::Volt),
    channel_diagnostic("pm25batt", "", 8, "wh41", "PM2.5 Battery", K::BatteryLevel, U::BatteryBars),
    channel_diagnostic("leakbatt", "", 8, "wh55", "Leak Detection Battery", K::BatteryLevel, U::BatteryBars),
    channel_diagnostic("tf_batt", "", 8, "wh34", "Soil Temperature Battery", K::BatteryLevel, U::Volt),
    channel_diagnostic("leaf_batt", "", 8, "wh35", "Leaf Wetness Battery", K::BatteryLevel, U::Volt),
    channel_diagnostic("ldsbatt", "", 4, "wh54", "LDS Battery", K::BatteryLevel, U::Volt),

    // Local query API diagnostics
    channel_diagnostic("pm25_ch", "_batt", 4, "wh41", "PM2.5 Battery", K::BatteryLevel, U::BatteryBars),
    channel_diagnostic("pm25_ch", "_rssi", 4, "wh41", "PM2.5 RSSI", K::SignalStrength, U::DecibelMilliwatt),
    channel_diagnostic("pm25_ch", "_signal", 4, "wh41", "PM2.5 Signal", K::SignalStrength, U::SignalBars),
    channel_diagnostic("leak_ch", "_batt", 4, "wh55", "Leak Detection Battery", K::BatteryLevel, U::BatteryBars),
];
