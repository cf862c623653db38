// Copyright @yucwang 2021

pub mod core;
pub mod emitters;
pub mod integrators;
pub mod materials;
pub mod math;
pub mod shapes;
