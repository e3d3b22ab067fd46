//! Chart data derived from the dashboard datasets.
//!
//! Only labels and series are produced here; colors and layout belong to whatever renders them.

use board_model::{CoffeeBrand, CoffeeConsumption, WeeklyMood};
use serde::Serialize;

const POPULARITY_LABEL: &str = "인기도";
const PERCENT_RANGE: (f64, f64) = (0.0, 100.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Bar,
    Donut,
    StackedBar,
    StackedArea,
    Line,
}

/// Y axis a series is plotted against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Axis {
    #[default]
    #[serde(rename = "y")]
    Primary,
    #[serde(rename = "y-bugs")]
    Bugs,
    #[serde(rename = "y-productivity")]
    Productivity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
    pub axis: Axis,
}

impl Series {
    fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
            axis: Axis::Primary,
        }
    }

    fn on(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub kind: ChartKind,
    /// X axis labels (or slice labels for a donut).
    pub labels: Vec<String>,
    pub series: Vec<Series>,
    /// Fixed Y range, when the chart has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_range: Option<(f64, f64)>,
}

impl Chart {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

fn brand_chart(kind: ChartKind, brands: &[CoffeeBrand]) -> Chart {
    Chart {
        kind,
        labels: brands.iter().map(|b| b.brand.clone()).collect(),
        series: vec![Series::new(
            POPULARITY_LABEL,
            brands.iter().map(|b| b.popularity).collect(),
        )],
        y_range: None,
    }
}

pub fn brand_bar(brands: &[CoffeeBrand]) -> Chart {
    brand_chart(ChartKind::Bar, brands)
}

pub fn brand_donut(brands: &[CoffeeBrand]) -> Chart {
    brand_chart(ChartKind::Donut, brands)
}

fn mood_chart(kind: ChartKind, mood: &[WeeklyMood]) -> Chart {
    let series = |label: &str, pick: fn(&WeeklyMood) -> f64| {
        Series::new(label, mood.iter().map(pick).collect())
    };
    Chart {
        kind,
        labels: mood.iter().map(|m| m.week.clone()).collect(),
        series: vec![
            series("Happy", |m| m.happy),
            series("Tired", |m| m.tired),
            series("Stressed", |m| m.stressed),
        ],
        y_range: Some(PERCENT_RANGE),
    }
}

pub fn mood_stacked_bar(mood: &[WeeklyMood]) -> Chart {
    mood_chart(ChartKind::StackedBar, mood)
}

pub fn mood_stacked_area(mood: &[WeeklyMood]) -> Chart {
    mood_chart(ChartKind::StackedArea, mood)
}

/// Bugs and productivity per team against daily cups of coffee.
///
/// X labels come from the first team's series; with no teams the chart is empty.
pub fn consumption_lines(consumption: &CoffeeConsumption) -> Chart {
    let Some(first) = consumption.teams.first() else {
        return Chart {
            kind: ChartKind::Line,
            labels: Vec::new(),
            series: Vec::new(),
            y_range: None,
        };
    };

    let labels = first.series.iter().map(|p| format!("{}잔", p.cups)).collect();
    let series = consumption
        .teams
        .iter()
        .flat_map(|team| {
            [
                Series::new(
                    format!("{} - 버그 수", team.team),
                    team.series.iter().map(|p| p.bugs).collect(),
                )
                .on(Axis::Bugs),
                Series::new(
                    format!("{} - 생산성", team.team),
                    team.series.iter().map(|p| p.productivity).collect(),
                )
                .on(Axis::Productivity),
            ]
        })
        .collect();

    Chart {
        kind: ChartKind::Line,
        labels,
        series,
        y_range: None,
    }
}
