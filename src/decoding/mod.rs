pub mod beam;
pub mod labels;
pub mod logmath;
pub mod softmax;
