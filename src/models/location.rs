use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub iso2: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub name: String,
    pub iso2: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
}

impl Country {
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.iso2)
    }
}

impl State {
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.iso2)
    }
}
