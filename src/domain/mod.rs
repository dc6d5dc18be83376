pub mod types;

pub use types::{
    CompetencyLevel, CostPoint, FigureStyle, Observation, SensitivityGroup, SensitivityRow,
    TechLevel,
};
