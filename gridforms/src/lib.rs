//! Grid layout engine and declarative UI loader.
//!
//! A [`Layout`] is a grid of [`Row`]s and [`Column`]s hosting controls and
//! nested layouts. Layouts are usually built from a JSON description by a
//! [`LoaderContext`], then resolved to pixel rectangles whenever the window
//! is resized or a splitter is dragged.

#![allow(unused_imports)]
#![allow(unused_variables)]

mod app;
mod brush;
mod button;
mod color;
mod control;
mod error;
mod events;
mod font;
mod label;
pub mod layout;
pub mod loader;
mod sizing;
mod style;
mod text_box;

pub use app::*;
pub use brush::{Brush, GradientStop};
pub use button::{Button, ButtonBuilder, ButtonKind, CheckState};
pub use color::Color;
pub use control::*;
pub use error::{Error, Result};
pub use events::*;
pub use font::*;
pub use label::Label;
pub use layout::*;
pub use loader::{
    ControlKind, FragmentSource, FsFragments, GlobalJsonData, LoaderContext,
    LoaderContextBuilder, MemoryFragments,
};
pub use sizing::{SizeKind, SizingValue};
pub use style::*;
pub use text_box::{TextBox, TextBoxOptions};

use core::any::Any;
use serde_json::{Map, Value};
use static_assertions::assert_not_impl_any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, error, trace, warn};

/// Rectangle in window pixels. `right` and `bottom` are exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.left && pt.x < self.right && pt.y >= self.top && pt.y < self.bottom
    }

    /// Shrinks the rectangle by the given edge amounts. The result never has
    /// negative width or height.
    pub fn deflate(&self, left: f32, top: f32, right: f32, bottom: f32) -> Rect {
        let l = self.left + left;
        let t = self.top + top;
        Rect {
            left: l,
            top: t,
            right: (self.right - right).max(l),
            bottom: (self.bottom - bottom).max(t),
        }
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

pub fn with<T, F: FnMut(&mut T)>(mut value: T, mut f: F) -> T {
    f(&mut value);
    value
}

// The layout tree and everything the loader hands out are owned by the UI
// thread.
assert_not_impl_any!(Layout: Send, Sync);
assert_not_impl_any!(LoaderContext: Send, Sync);
assert_not_impl_any!(App: Send, Sync);
