use serde::{Deserialize, Serialize};

/// Entry of `GET /mock/top-coffee-brands`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoffeeBrand {
    pub brand: String,
    pub popularity: f64,
}

/// Entry of `GET /mock/weekly-mood-trend`; values are percentages of the week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyMood {
    pub week: String,
    pub happy: f64,
    pub tired: f64,
    pub stressed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoffeeDataPoint {
    pub cups: u32,
    pub bugs: f64,
    pub productivity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamCoffee {
    pub team: String,
    pub series: Vec<CoffeeDataPoint>,
}

/// Response of `GET /mock/coffee-consumption`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoffeeConsumption {
    pub teams: Vec<TeamCoffee>,
}
