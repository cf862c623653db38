// Copyright @yucwang 2026

pub mod area;
pub mod distant;
pub mod point;
pub mod spot;
