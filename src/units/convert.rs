/// Unit math per quantity kind
use crate::error::DecodeError;
use crate::models::{QuantityKind, Unit, UnitSystem};

pub const INCH_TO_MM: f64 = 25.4;
pub const INHG_TO_HPA: f64 = 33.863_886_666_7;
pub const MPH_TO_MS: f64 = 0.447_04;
pub const KMH_TO_MS: f64 = 1.0 / 3.6;
pub const MILE_TO_KM: f64 = 1.609_344;
/// One bar of the vendor battery scale in percent (5 bars = 100 %).
pub const BATTERY_BAR_PERCENT: f64 = 20.0;

/// Units a quantity kind may be expressed in.
pub fn accepts(kind: QuantityKind, unit: Unit) -> bool {
    use QuantityKind as K;
    match kind {
        K::Temperature => matches!(unit, Unit::Celsius | Unit::Fahrenheit),
        K::Humidity => unit == Unit::Percent,
        K::Pressure => matches!(unit, Unit::Hectopascal | Unit::InchOfMercury),
        K::Speed => matches!(
            unit,
            Unit::KilometerPerHour | Unit::MilePerHour | Unit::MeterPerSecond
        ),
        K::RainRate => matches!(unit, Unit::MillimeterPerHour | Unit::InchPerHour),
        K::RainAccumulated => matches!(unit, Unit::Millimeter | Unit::Inch),
        K::Distance => matches!(
            unit,
            Unit::Millimeter | Unit::Inch | Unit::Kilometer | Unit::Mile
        ),
        K::Concentration => matches!(unit, Unit::MicrogramPerCubicMeter | Unit::PartsPerMillion),
        K::Radiation => matches!(unit, Unit::WattPerSquareMeter | Unit::Lux),
        K::BatteryLevel => matches!(unit, Unit::Volt | Unit::Percent | Unit::BatteryBars),
        K::SignalStrength => matches!(unit, Unit::DecibelMilliwatt | Unit::SignalBars),
        K::Voltage => unit == Unit::Volt,
        K::RawNumeric => matches!(
            unit,
            Unit::Degree | Unit::UvIndex | Unit::Count | Unit::Second | Unit::None
        ),
        K::BatteryBinary | K::Boolean | K::Timestamp | K::RawString => unit == Unit::None,
    }
}

/// Unit a reading recorded in `native` is normalized to under `system`.
///
/// Units without a counterpart in the other system (concentrations,
/// radiation, voltages, counts) are kept as they are.
pub fn target_unit(native: Unit, system: UnitSystem) -> Unit {
    let (metric, imperial) = match native {
        Unit::Celsius | Unit::Fahrenheit => (Unit::Celsius, Unit::Fahrenheit),
        Unit::Hectopascal | Unit::InchOfMercury => (Unit::Hectopascal, Unit::InchOfMercury),
        Unit::KilometerPerHour | Unit::MilePerHour | Unit::MeterPerSecond => {
            (Unit::KilometerPerHour, Unit::MilePerHour)
        }
        Unit::Millimeter | Unit::Inch => (Unit::Millimeter, Unit::Inch),
        Unit::Kilometer | Unit::Mile => (Unit::Kilometer, Unit::Mile),
        Unit::MillimeterPerHour | Unit::InchPerHour => (Unit::MillimeterPerHour, Unit::InchPerHour),
        Unit::BatteryBars => return Unit::Percent,
        other => return other,
    };
    match system {
        UnitSystem::Metric => metric,
        UnitSystem::Imperial => imperial,
    }
}

/// Convert `value` of quantity `kind` from one unit to another.
///
/// Identical units pass through untouched. Fails only when either unit does
/// not belong to `kind` or the pair has no defined conversion.
pub fn convert(value: f64, kind: QuantityKind, from: Unit, to: Unit) -> Result<f64, DecodeError> {
    let unsupported = || DecodeError::UnsupportedUnitConversion { kind, from, to };

    if !accepts(kind, from) || !accepts(kind, to) {
        return Err(unsupported());
    }
    if from == to {
        return Ok(value);
    }

    match kind {
        QuantityKind::Temperature => match (from, to) {
            (Unit::Fahrenheit, Unit::Celsius) => Ok(fahrenheit_to_celsius(value)),
            (Unit::Celsius, Unit::Fahrenheit) => Ok(celsius_to_fahrenheit(value)),
            _ => Err(unsupported()),
        },
        QuantityKind::Pressure
        | QuantityKind::Speed
        | QuantityKind::RainRate
        | QuantityKind::RainAccumulated
        | QuantityKind::Distance => {
            let from_base = base_factor(from).ok_or_else(unsupported)?;
            let to_base = base_factor(to).ok_or_else(unsupported)?;
            Ok(value * from_base / to_base)
        }
        QuantityKind::BatteryLevel => match (from, to) {
            (Unit::BatteryBars, Unit::Percent) => Ok(value * BATTERY_BAR_PERCENT),
            (Unit::Percent, Unit::BatteryBars) => Ok(value / BATTERY_BAR_PERCENT),
            _ => Err(unsupported()),
        },
        _ => Err(unsupported()),
    }
}

/// Convert `value` from `native` to its counterpart under `system`.
pub fn normalize(
    value: f64,
    kind: QuantityKind,
    native: Unit,
    system: UnitSystem,
) -> Result<(f64, Unit), DecodeError> {
    let target = target_unit(native, system);
    convert(value, kind, native, target).map(|converted| (converted, target))
}

pub fn fahrenheit_to_celsius(value: f64) -> f64 {
    (value - 32.0) * 5.0 / 9.0
}

pub fn celsius_to_fahrenheit(value: f64) -> f64 {
    value * 9.0 / 5.0 + 32.0
}

/// Multiplier into the base unit of the unit's dimension: hPa for pressure,
/// m/s for speed, mm/h for rain rate, meters for lengths.
fn base_factor(unit: Unit) -> Option<f64> {
    match unit {
        Unit::Hectopascal => Some(1.0),
        Unit::InchOfMercury => Some(INHG_TO_HPA),
        Unit::MeterPerSecond => Some(1.0),
        Unit::KilometerPerHour => Some(KMH_TO_MS),
        Unit::MilePerHour => Some(MPH_TO_MS),
        Unit::MillimeterPerHour => Some(1.0),
        Unit::InchPerHour => Some(INCH_TO_MM),
        Unit::Millimeter => Some(0.001),
        Unit::Inch => Some(INCH_TO_MM / 1000.0),
        Unit::Kilometer => Some(1000.0),
        Unit::Mile => Some(MILE_TO_KM * 1000.0),
        _ => None,
    }
}
