
use std::io::{BufRead, Write};

use toml::map::Map;

use crate::ontology::namespace::Namespace;
use crate::prelude::{log_msg, FAIL};
use crate::scoring::curve::default_threshold_grid;

/// Run configuration of one evaluation. Paths are explicit; nothing is
/// resolved from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalConfig {
    pub ancestor_path: String,
    pub benchmark_path: String,
    pub namespace: Namespace,
    pub threshold_start: f64,
    pub threshold_end: f64,
    pub threshold_step: f64,
}

impl EvalConfig {
    pub fn new(
        ancestor_path: String, benchmark_path: String, namespace: Namespace,
        threshold_start: f64, threshold_end: f64, threshold_step: f64,
    ) -> Self {
        Self {
            ancestor_path,
            benchmark_path,
            namespace,
            threshold_start,
            threshold_end,
            threshold_step,
        }
    }

    pub fn from_toml(toml: &toml::Value) -> Self {
        let ancestor_path = toml["ancestor_path"].as_str().unwrap().to_string();
        let benchmark_path = toml["benchmark_path"].as_str().unwrap().to_string();
        let namespace = Namespace::get_with_str(toml["namespace"].as_str().unwrap())
            .expect("unknown namespace in config");
        let threshold_start = toml["threshold_start"].as_float().unwrap();
        let threshold_end = toml["threshold_end"].as_float().unwrap();
        let threshold_step = toml["threshold_step"].as_float().unwrap();
        Self {
            ancestor_path,
            benchmark_path,
            namespace,
            threshold_start,
            threshold_end,
            threshold_step,
        }
    }

    pub fn to_toml(&self) -> toml::Value {
        let mut map = Map::new();
        map.insert("ancestor_path".to_string(), toml::Value::String(self.ancestor_path.clone()));
        map.insert("benchmark_path".to_string(), toml::Value::String(self.benchmark_path.clone()));
        map.insert("namespace".to_string(), toml::Value::String(self.namespace.to_string()));
        map.insert("threshold_start".to_string(), toml::Value::Float(self.threshold_start));
        map.insert("threshold_end".to_string(), toml::Value::Float(self.threshold_end));
        map.insert("threshold_step".to_string(), toml::Value::Float(self.threshold_step));
        toml::Value::Table(map)
    }

    /// Threshold grid from the configured range; falls back to the default
    /// grid when the range is degenerate.
    pub fn threshold_grid(&self) -> Vec<f64> {
        if self.threshold_step <= 0.0 || self.threshold_end < self.threshold_start {
            return default_threshold_grid();
        }
        let mut grid = Vec::new();
        let mut threshold = self.threshold_start;
        while threshold <= self.threshold_end + 1e-9 {
            grid.push(threshold);
            threshold += self.threshold_step;
        }
        grid
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            ancestor_path: String::new(),
            benchmark_path: String::new(),
            namespace: Namespace::BPO,
            threshold_start: 0.01,
            threshold_end: 0.99,
            threshold_step: 0.01,
        }
    }
}

pub fn write_eval_config_to_file(path: &str, eval_config: EvalConfig) {
    let mut file = std::fs::File::create(path).expect(
        &log_msg(FAIL, &format!("Unable to create config file: {}", path))
    );
    let toml = eval_config.to_toml();
    file.write_all(toml::to_string(&toml).unwrap().as_bytes()).unwrap();
}

pub fn read_eval_config_from_file(path: &str) -> EvalConfig {
    let file = std::fs::File::open(path).expect(
        &log_msg(FAIL, &format!("Config file not found: {}", path))
    );
    let reader = std::io::BufReader::new(file);
    let toml = toml::from_str(
        &reader.lines().map(|x| format!("{}\n", x.unwrap())).collect::<String>()
    ).unwrap();
    EvalConfig::from_toml(&toml)
}
