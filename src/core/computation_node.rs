// Copyright @yucwang 2021

pub trait ComputationNode {
    // Human readable summary of a node and its parameters.
    fn to_string(&self) -> String;
}
