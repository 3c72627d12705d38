use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One emitted metric line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "logname")]
    pub log_name: String,
    /// Uniform in `[0, 1)`.
    #[serde(rename = "some_metric")]
    pub value: f32,
}

impl MetricSample {
    pub fn new<R: Rng + ?Sized>(log_name: &str, rng: &mut R) -> Self {
        Self {
            timestamp: Utc::now(),
            log_name: log_name.to_string(),
            value: rng.gen::<f32>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn values_are_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let s = MetricSample::new("t", &mut rng);
            assert!((0.0..1.0).contains(&s.value));
        }
    }

    #[test]
    fn wire_keys() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = MetricSample::new("json_outputer", &mut rng);
        let v: serde_json::Value = serde_json::to_value(&s).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["logname"], "json_outputer");
        assert!(obj["timestamp"].is_string());
        assert!(obj["some_metric"].is_number());
    }
}
