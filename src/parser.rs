use crate::models::Car;
use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Engine volume and power share one token, e.g. `2.0 л (150 л.с.)`.
/// The middle character is unescaped, so `150` matches as well as `2.0`.
static ENGINE_POWER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d.\d").expect("engine pattern is valid"));

static DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("digit pattern is valid"));

/// Fields carried by the inline description block of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Description {
    pub engine_power: String,
    pub fuel: String,
    pub transmission: String,
    pub drive_unit: String,
    pub mileage: i64,
}

/// Splits `"Toyota Camry, 2015"` into name and year.
pub fn split_title(text: &str) -> Result<(String, i32)> {
    let parts: Vec<&str> = text.trim().split(',').collect();
    if parts.len() != 2 {
        bail!(
            "Title '{}' has {} comma-separated parts, expected 2",
            text.trim(),
            parts.len()
        );
    }

    let name = parts[0].trim();
    if name.is_empty() {
        bail!("Empty name in title '{}'", text.trim());
    }

    let year = parts[1]
        .trim()
        .parse::<i32>()
        .with_context(|| format!("Failed to parse year from '{}'", parts[1].trim()))?;

    Ok((name.to_string(), year))
}

pub fn split_description(text: &str) -> Result<Description> {
    let parts: Vec<&str> = text.trim().split(',').collect();
    if parts.len() != 5 {
        bail!(
            "Description '{}' has {} comma-separated parts, expected 5",
            text.trim(),
            parts.len()
        );
    }

    Ok(Description {
        engine_power: parts[0].trim().to_string(),
        fuel: parts[1].trim().to_string(),
        transmission: parts[2].trim().to_string(),
        drive_unit: parts[3].trim().to_string(),
        mileage: parse_mileage(parts[4])?,
    })
}

/// `"150 000 km"` -> `150000`: the trailing unit token is dropped and the
/// remaining digit groups are glued together.
pub fn parse_mileage(text: &str) -> Result<i64> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let digits = match tokens.split_last() {
        Some((_unit, groups)) => groups.concat(),
        None => String::new(),
    };

    digits
        .parse::<i64>()
        .with_context(|| format!("Failed to parse mileage from '{}'", text.trim()))
}

/// Keeps every digit run of the price text, so `"$ 12,500"` becomes `12500`.
/// Prices beyond `u64::MAX` are rejected.
pub fn extract_price(text: &str) -> Result<u64> {
    let digits: String = DIGITS_RE.find_iter(text).map(|m| m.as_str()).collect();

    digits
        .parse::<u64>()
        .with_context(|| format!("Failed to parse price from '{}'", text.trim()))
}

/// Returns engine capacity and horse power. Exactly two matches are required;
/// horse power is truncated toward zero.
pub fn extract_engine_and_power(text: &str) -> Result<(f64, i64)> {
    let matches: Vec<&str> = ENGINE_POWER_RE
        .find_iter(text).map(|m| m.as_str()).collect();

    let [engine, power] = matches.as_slice() else {
        bail!(
            "Expected engine capacity and horse power in '{}', found {} matches",
            text.trim(),
            matches.len()
        );
    };

    let engine_capacity = engine
        .parse::<f64>()
        .with_context(|| format!("Failed to parse engine capacity from '{}'", engine))?;
    let horse_power = power
        .parse::<f64>()
        .with_context(|| format!("Failed to parse horse power from '{}'", power))?
        .trunc() as i64;

    Ok((engine_capacity, horse_power))
}

/// Builds a `Car` from the three raw text fragments of one listing.
pub fn parse_car(title: &str, description: &str, price: &str) -> Result<Car> {
    let (name, year) = split_title(title)?;
    let info = split_description(description)?;
    let price = extract_price(price)?;
    let (engine_capacity, horse_power) = extract_engine_and_power(&info.engine_power)?;

    Ok(Car {
        name,
        year,
        engine_capacity,
        horse_power,
        transmission: info.transmission,
        drive_unit: info.drive_unit,
        fuel: info.fuel,
        mileage: info.mileage,
        price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_title() {
        let (name, year) = split_title("Toyota Camry, 2015").unwrap();
        assert_eq!(name, "Toyota Camry");
        assert_eq!(year, 2015);
    }

    #[test]
    fn test_split_title_with_padding() {
        let (name, year) = split_title("  Lada Vesta ,  2019 \n").unwrap();
        assert_eq!(name, "Lada Vesta");
        assert_eq!(year, 2019);
    }

    #[test]
    fn test_split_title_rejects_wrong_part_count() {
        assert!(split_title("Toyota Camry 2015").is_err());
        assert!(split_title("Toyota, Camry, 2015").is_err());
    }

    #[test]
    fn test_split_title_rejects_empty_name_and_bad_year() {
        assert!(split_title(", 2015").is_err());
        assert!(split_title("Toyota Camry, new").is_err());
    }

    #[test]
    fn test_split_description() {
        let info = split_description("2.0, Petrol, Automatic, AWD, 150 000 km").unwrap();
        assert_eq!(info.engine_power, "2.0");
        assert_eq!(info.fuel, "Petrol");
        assert_eq!(info.transmission, "Automatic");
        assert_eq!(info.drive_unit, "AWD");
        assert_eq!(info.mileage, 150000);
    }

    #[test]
    fn test_split_description_rejects_four_parts() {
        let err = split_description("2.0, Petrol, Automatic, 150 000 km").unwrap_err();
        assert!(err.to_string().contains("expected 5"));
    }

    #[test]
    fn test_parse_mileage() {
        assert_eq!(parse_mileage(" 150 000 km").unwrap(), 150000);
        assert_eq!(parse_mileage("87000 км").unwrap(), 87000);
        assert_eq!(parse_mileage("1\u{a0}200\u{a0}км").unwrap(), 1200);
    }

    #[test]
    fn test_parse_mileage_unit_only() {
        assert!(parse_mileage("km").is_err());
        assert!(parse_mileage("").is_err());
    }

    #[test]
    fn test_extract_price() {
        assert_eq!(extract_price("$ 12,500").unwrap(), 12500);
        assert_eq!(extract_price("1 250 000 ₽").unwrap(), 1250000);
    }

    #[test]
    fn test_extract_price_without_digits() {
        assert!(extract_price("Договорная").is_err());
    }

    #[test]
    fn test_extract_price_limits() {
        assert_eq!(
            extract_price("12 345 678 901 234 567 890 ₽").unwrap(),
            12_345_678_901_234_567_890
        );
        assert!(extract_price("123 456 789 012 345 678 901 ₽").is_err());
    }

    #[test]
    fn test_extract_engine_and_power() {
        let (engine, power) = extract_engine_and_power("2.0 л (150 л.с.)").unwrap();
        assert_eq!(engine, 2.0);
        assert_eq!(power, 150);
    }

    #[test]
    fn test_extract_engine_and_power_truncates() {
        let (engine, power) = extract_engine_and_power("1.6 / 9.9").unwrap();
        assert_eq!(engine, 1.6);
        assert_eq!(power, 9);
    }

    #[test]
    fn test_extract_engine_and_power_requires_two_matches() {
        assert!(extract_engine_and_power("2.0").is_err());
        assert!(extract_engine_and_power("электро").is_err());
        assert!(extract_engine_and_power("2.0 л (150 л.с.) 4.5").is_err());
    }

    #[test]
    fn test_parse_car() {
        let car = parse_car(
            "Toyota Camry, 2015",
            "2.5 л (181 л.с.), бензин, АКПП, передний, 98 000 км",
            "1 950 000 ₽",
        )
        .unwrap();

        assert_eq!(
            car,
            Car {
                name: "Toyota Camry".to_string(),
                year: 2015,
                engine_capacity: 2.5,
                horse_power: 181,
                transmission: "АКПП".to_string(),
                drive_unit: "передний".to_string(),
                fuel: "бензин".to_string(),
                mileage: 98000,
                price: 1950000,
            }
        );
    }
}
