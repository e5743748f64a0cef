use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{GridError, GridResult};
use crate::utils::particle_table::ParticleTable;

/// 支持的原子/离子类型，取值即输入表中的类型代码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AtomType {
    H = 1,
    O = 2,
    N = 3,
    Na = 4,
    Cl = 5,
}

impl AtomType {
    pub const ALL: [AtomType; 5] = [
        AtomType::H,
        AtomType::O,
        AtomType::N,
        AtomType::Na,
        AtomType::Cl,
    ];

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AtomType::H => "H",
            AtomType::O => "O",
            AtomType::N => "N",
            AtomType::Na => "Na",
            AtomType::Cl => "Cl",
        }
    }

    pub fn from_code(code: i64) -> GridResult<Self> {
        Self::ALL
            .into_iter()
            .find(|atom| atom.code() == code)
            .ok_or_else(|| GridError::invalid(format!("无法识别的原子类型代码: {}", code)))
    }

    pub fn from_symbol(symbol: &str) -> GridResult<Self> {
        Self::ALL
            .into_iter()
            .find(|atom| atom.symbol() == symbol)
            .ok_or_else(|| GridError::invalid(format!("无法识别的原子类型: {:?}", symbol)))
    }
}

impl fmt::Display for AtomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// 粒子筛选条件: 全部粒子，或某一种原子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSelector {
    All,
    Atom(AtomType),
}

impl TypeSelector {
    /// 按名称构造，"all" 表示不过滤
    pub fn by_name(name: &str) -> GridResult<Self> {
        if name == "all" {
            return Ok(TypeSelector::All);
        }
        AtomType::from_symbol(name).map(TypeSelector::Atom)
    }

    /// 按类型代码构造
    pub fn by_code(code: i64) -> GridResult<Self> {
        AtomType::from_code(code).map(TypeSelector::Atom)
    }

    fn matches(&self, type_code: i64) -> bool {
        match self {
            TypeSelector::All => true,
            TypeSelector::Atom(atom) => atom.code() == type_code,
        }
    }
}

impl FromStr for TypeSelector {
    type Err = GridError;

    /// 整数文本按代码解析，其余按名称解析
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.parse::<i64>() {
            Ok(code) => TypeSelector::by_code(code),
            Err(_) => TypeSelector::by_name(s),
        }
    }
}

impl fmt::Display for TypeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSelector::All => f.write_str("all"),
            TypeSelector::Atom(atom) => write!(f, "{}", atom),
        }
    }
}

/// 观察视角，决定哪两个坐标轴参与二维投影
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// 俯视图 (x, y)
    #[default]
    Top,
    /// 正视图 (x, z)
    Front,
    /// 侧视图 (y, z)
    Side,
}

impl Projection {
    pub fn name(self) -> &'static str {
        match self {
            Projection::Top => "top",
            Projection::Front => "front",
            Projection::Side => "side",
        }
    }

    /// 投影后两个坐标轴的名称
    pub fn axes(self) -> (&'static str, &'static str) {
        match self {
            Projection::Top => ("x", "y"),
            Projection::Front => ("x", "z"),
            Projection::Side => ("y", "z"),
        }
    }
}

impl FromStr for Projection {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" | "xy" => Ok(Projection::Top),
            "front" | "xz" => Ok(Projection::Front),
            "side" | "yz" => Ok(Projection::Side),
            other => Err(GridError::invalid(format!("无法识别的投影视角: {:?}", other))),
        }
    }
}

/// 筛选出的粒子坐标，三个数组长度相同且保持原表顺序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectedCoordinates {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl SelectedCoordinates {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn project(&self, projection: Projection) -> (&[f64], &[f64]) {
        match projection {
            Projection::Top => (&self.x, &self.y),
            Projection::Front => (&self.x, &self.z),
            Projection::Side => (&self.y, &self.z),
        }
    }
}

/// 从粒子表中取出指定类型粒子的 x, y, z 坐标
pub fn select_coordinates(table: &ParticleTable, selector: TypeSelector) -> SelectedCoordinates {
    let mut selected = SelectedCoordinates::default();
    for record in table
        .records()
        .iter()
        .filter(|record| selector.matches(record.type_code))
    {
        selected.x.push(record.x);
        selected.y.push(record.y);
        selected.z.push(record.z);
    }
    selected
}

/// 同 `select_coordinates`，但筛选条件以文本给出（名称、代码或 "all"）
pub fn select_coordinates_by(
    table: &ParticleTable,
    atom_type: &str,
) -> GridResult<SelectedCoordinates> {
    let selector = atom_type.parse::<TypeSelector>()?;
    Ok(select_coordinates(table, selector))
}
