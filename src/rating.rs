use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Tier {
    Average,
    Solid,
    Strong,
    Elite,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::Elite => "ELITE",
            Tier::Strong => "STRONG",
            Tier::Solid => "SOLID",
            Tier::Average => "AVERAGE",
        }
    }
}

pub fn classify(overall: f64) -> Tier {
    if overall >= 85.0 {
        Tier::Elite
    } else if overall >= 80.0 {
        Tier::Strong
    } else if overall >= 75.0 {
        Tier::Solid
    } else {
        Tier::Average
    }
}
