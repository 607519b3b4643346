//! 数学基础类型
//!
//! 基于 nalgebra 提供的点类型的别名。

use nalgebra as na;

/// 2D点类型
pub type Point2 = na::Point2<f64>;
