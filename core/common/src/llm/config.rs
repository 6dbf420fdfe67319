//! サンプリング設定
//!
//! セッション開始時に一度だけ決め、ターンごとには変更しない。

use crate::domain::ModelName;
use crate::error::Error;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.8;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// 補完リクエストのサンプリング設定（モデル・温度・タイムアウト）
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    pub model: ModelName,
    /// 0.0〜1.0
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            model: ModelName::new(DEFAULT_MODEL),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SamplingParams {
    /// 範囲外の温度・ゼロのタイムアウト・空のモデル名を拒否する
    pub fn validate(&self) -> Result<(), Error> {
        if self.model.trim().is_empty() {
            return Err(Error::invalid_argument("Model name must not be empty"));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(Error::invalid_argument(format!(
                "Temperature must be between 0 and 1 (got {})",
                self.temperature
            )));
        }
        if self.timeout.is_zero() {
            return Err(Error::invalid_argument("Timeout must be greater than zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let p = SamplingParams::default();
        assert_eq!(&*p.model, "gpt-3.5-turbo");
        assert_eq!(p.temperature, 0.8);
        assert_eq!(p.timeout, Duration::from_secs(60));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_temperature() {
        let p = SamplingParams {
            temperature: 1.5,
            ..Default::default()
        };
        let err = p.validate().unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("Temperature"));

        let p = SamplingParams {
            temperature: -0.1,
            ..Default::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_bounds() {
        for t in [0.0, 1.0] {
            let p = SamplingParams {
                temperature: t,
                ..Default::default()
            };
            assert!(p.validate().is_ok());
        }
    }

    #[test]
    fn test_validate_rejects_zero_timeout_and_empty_model() {
        let p = SamplingParams {
            timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(p.validate().is_err());
        let p = SamplingParams {
            model: ModelName::new("  "),
            ..Default::default()
        };
        assert!(p.validate().is_err());
    }
}
