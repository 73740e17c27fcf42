//! # univer-bridge-protocol
//!
//! The Univer side of univer-bridge: serde types matching the editor's
//! JSON payloads, and the [`UniverAgent`] / [`UserDirectory`] traits a
//! transport implements.
//!
//! Cell values are decoded once into the closed [`CellValue`] enum, so
//! nothing downstream inspects raw JSON.

pub mod agent;
pub mod comment;
pub mod conditional_format;
pub mod error;
pub mod image;
pub mod range;
pub mod sheet;
pub mod style;
pub mod value;

pub use agent::{UniverAgent, UserDirectory};
pub use comment::{Comment, DocumentBody, User};
pub use conditional_format::{
    CfOperator, CfRule, CfScalar, CfValueConfig, CfValueType, ColorScalePoint,
    ConditionalFormatRule, DataBarConfig, HighlightKind, HighlightRule, HighlightStyle,
    IconSetConfig, IconType, NumberOperand,
};
pub use error::{AgentError, Result};
pub use image::{AnchorPosition, ImageInfo, NewImage, SheetTransform, Transform};
pub use range::RangeSpec;
pub use sheet::{Freeze, MergeStrategy, SheetInfo};
pub use style::{
    BooleanNumber, BorderData, BorderStyleData, BorderStyleType, BorderType, ColorStyle,
    FontHorizontalAlign, FontProperties, FontVerticalAlign, HorizontalAlign, NumberFormatPattern,
    StyleData, TextDecoration, TextDirection, TextRotation, VerticalAlign, WrapStrategy,
};
pub use value::{CellValue, FormulaMatrix, ValueMatrix};
