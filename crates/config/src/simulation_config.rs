//! Simulation driver configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Parameters of the random-action simulation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of random actions after the initial stocking
    pub steps: u32,

    /// RNG seed; a fresh seed is drawn when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Number of distinct users taking part
    pub user_pool_size: usize,

    /// Users are drawn without repetition from `1..=max_user_id`
    pub max_user_id: u64,

    /// Bounds of the number of books stocked before the first step
    pub pre_add_min: usize,
    pub pre_add_max: usize,

    /// Upper bounds of the per-action quantities (lower bound is always 1)
    pub max_add_quantity: u32,
    pub max_delete_quantity: u32,
    pub max_borrow_quantity: u32,
    pub max_return_quantity: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps: 20,
            seed: None,
            user_pool_size: 50,
            max_user_id: 10_000,
            pre_add_min: 30,
            pre_add_max: 60,
            max_add_quantity: 5,
            max_delete_quantity: 5,
            max_borrow_quantity: 3,
            max_return_quantity: 3,
        }
    }
}

impl ConfigSection for SimulationConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let results = vec![
            Validator::in_range(self.steps, 1, 100_000, "simulation.steps"),
            Validator::at_least(self.max_user_id, 1, "simulation.max_user_id"),
            Validator::in_range(
                self.user_pool_size as u64,
                1,
                self.max_user_id.max(1),
                "simulation.user_pool_size",
            ),
            Validator::ordered(self.pre_add_min, self.pre_add_max, "simulation.pre_add_min"),
            Validator::at_least(self.max_add_quantity, 1, "simulation.max_add_quantity"),
            Validator::at_least(self.max_delete_quantity, 1, "simulation.max_delete_quantity"),
            Validator::at_least(self.max_borrow_quantity, 1, "simulation.max_borrow_quantity"),
            Validator::at_least(self.max_return_quantity, 1, "simulation.max_return_quantity"),
        ];

        Validator::collect_errors(results)
    }

    fn merge(&mut self, other: Self) {
        self.steps = other.steps;
        self.seed = other.seed.or(self.seed);
        self.user_pool_size = other.user_pool_size;
        self.max_user_id = other.max_user_id;
        self.pre_add_min = other.pre_add_min;
        self.pre_add_max = other.pre_add_max;
        self.max_add_quantity = other.max_add_quantity;
        self.max_delete_quantity = other.max_delete_quantity;
        self.max_borrow_quantity = other.max_borrow_quantity;
        self.max_return_quantity = other.max_return_quantity;
    }

    fn section_name(&self) -> &'static str {
        "simulation"
    }
}
