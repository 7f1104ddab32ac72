use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ApiAttrib {
    Intelligence,
    Memory,
    Charisma,
    Perception,
    Willpower,
}

impl ApiAttrib {
    pub const ALL: [ApiAttrib; 5] = [
        ApiAttrib::Intelligence,
        ApiAttrib::Memory,
        ApiAttrib::Charisma,
        ApiAttrib::Perception,
        ApiAttrib::Willpower,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiAttrib::Intelligence => "intelligence",
            ApiAttrib::Memory => "memory",
            ApiAttrib::Charisma => "charisma",
            ApiAttrib::Perception => "perception",
            ApiAttrib::Willpower => "willpower",
        }
    }
}

impl std::str::FromStr for ApiAttrib {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_plain::from_str(s.trim()).map_err(|_| ())
    }
}

/// The five character attributes. All arithmetic is elementwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiCharAttribs {
    pub intl: f64,
    pub mem: f64,
    pub cha: f64,
    pub per: f64,
    pub wil: f64,
}

impl ApiCharAttribs {
    pub fn new(intl: f64, mem: f64, cha: f64, per: f64, wil: f64) -> Self {
        Self {
            intl,
            mem,
            cha,
            per,
            wil,
        }
    }

    pub fn splat(value: f64) -> Self {
        Self::new(value, value, value, value, value)
    }

    pub fn set_all(&mut self, value: f64) -> &mut Self {
        *self = Self::splat(value);
        self
    }

    pub fn get(&self, attrib: ApiAttrib) -> f64 {
        match attrib {
            ApiAttrib::Intelligence => self.intl,
            ApiAttrib::Memory => self.mem,
            ApiAttrib::Charisma => self.cha,
            ApiAttrib::Perception => self.per,
            ApiAttrib::Willpower => self.wil,
        }
    }

    pub fn get_mut(&mut self, attrib: ApiAttrib) -> &mut f64 {
        match attrib {
            ApiAttrib::Intelligence => &mut self.intl,
            ApiAttrib::Memory => &mut self.mem,
            ApiAttrib::Charisma => &mut self.cha,
            ApiAttrib::Perception => &mut self.per,
            ApiAttrib::Willpower => &mut self.wil,
        }
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.intl), f(self.mem), f(self.cha), f(self.per), f(self.wil))
    }

    fn zip_with(self, rhs: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self::new(
            f(self.intl, rhs.intl),
            f(self.mem, rhs.mem),
            f(self.cha, rhs.cha),
            f(self.per, rhs.per),
            f(self.wil, rhs.wil),
        )
    }
}

impl From<f64> for ApiCharAttribs {
    fn from(value: f64) -> Self {
        Self::splat(value)
    }
}

impl Add for ApiCharAttribs {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Add<f64> for ApiCharAttribs {
    type Output = Self;

    fn add(self, rhs: f64) -> Self::Output {
        self.map(|a| a + rhs)
    }
}

impl AddAssign for ApiCharAttribs {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for ApiCharAttribs {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Sub<f64> for ApiCharAttribs {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self::Output {
        self.map(|a| a - rhs)
    }
}

impl SubAssign for ApiCharAttribs {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul for ApiCharAttribs {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a * b)
    }
}

impl Mul<f64> for ApiCharAttribs {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        self.map(|a| a * rhs)
    }
}

impl Div for ApiCharAttribs {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a / b)
    }
}

impl Div<f64> for ApiCharAttribs {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        self.map(|a| a / rhs)
    }
}
