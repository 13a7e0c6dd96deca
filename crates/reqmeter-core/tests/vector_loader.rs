//! JSON test vector loader shared by naming tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::fs;

use serde::Deserialize;

use reqmeter_core::GroupingRules;

#[derive(Debug, Deserialize)]
pub struct TimerVectorFile {
    #[serde(default)]
    pub rules: Vec<RuleData>,
    pub cases: Vec<TimerCase>,
}

#[derive(Debug, Deserialize)]
pub struct RuleData {
    pub name: String,
    pub pattern: String,
}

#[derive(Debug, Deserialize)]
pub struct TimerCase {
    pub description: String,
    pub path: String,
    pub method: String,
    pub expect: String,
}

#[derive(Debug, Deserialize)]
pub struct CounterCase {
    pub status: u16,
    pub expect: String,
}

impl TimerVectorFile {
    pub fn compile_rules(&self) -> GroupingRules {
        GroupingRules::compile(
            self.rules
                .iter()
                .map(|r| (r.name.as_str(), r.pattern.as_str())),
        )
        .expect("vector rules must compile")
    }
}

pub fn load_timer_vectors(name: &str) -> TimerVectorFile {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap_or_else(|e| panic!("bad vector file {name}: {e}"))
}

pub fn load_counter_vectors(name: &str) -> Vec<CounterCase> {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap_or_else(|e| panic!("bad vector file {name}: {e}"))
}
