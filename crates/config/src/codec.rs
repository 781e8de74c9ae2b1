//! Binary codec for configurations.
//!
//! Uses bincode's standard config with the `Encode`/`Decode` derives on
//! [`Configuration`]. Modes go out as varint tags, the table shape as three
//! fixed-width `f64`s.

use hotmath_core::Configuration;

use crate::store::ConfigError;

/// Encode a configuration to bytes.
pub fn encode(config: &Configuration) -> Result<Vec<u8>, ConfigError> {
    Ok(bincode::encode_to_vec(config, bincode::config::standard())?)
}

/// Decode a configuration from bytes.
pub fn decode(data: &[u8]) -> Result<Configuration, ConfigError> {
    let (config, _) = bincode::decode_from_slice(data, bincode::config::standard())?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotmath_core::{ArcMode, SqrtLutConfig, SqrtMode, TrigMode};

    #[test]
    fn tuned_config_survives_encoding() {
        let config = Configuration {
            sqrt: SqrtMode::InvSqrt,
            sqrt_lut: SqrtLutConfig {
                min: 0.0,
                max: 1024.0,
                step: 0.01,
            },
            tan: TrigMode::Lut,
            acos: ArcMode::Poly,
            ..Configuration::default()
        };

        let decoded = decode(&encode(&config).unwrap()).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn compact_encoding() {
        let encoded = encode(&Configuration::default()).unwrap();
        // seven one-byte mode tags plus three f64
        assert_eq!(encoded.len(), 7 + 3 * 8);
    }

    #[test]
    fn unknown_mode_tag_is_an_error() {
        let mut encoded = encode(&Configuration::default()).unwrap();
        encoded[0] = 99;
        assert!(matches!(decode(&encoded), Err(ConfigError::Decode(_))));
    }

    #[test]
    fn truncated_input_is_an_error() {
        let encoded = encode(&Configuration::fastest_guess()).unwrap();
        let err = decode(&encoded[..encoded.len() / 2]).unwrap_err();
        assert!(matches!(err, ConfigError::Decode(_)));
    }
}
