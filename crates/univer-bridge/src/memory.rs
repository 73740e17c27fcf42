//! In-memory Univer document.
//!
//! [`MemoryAgent`] keeps sheets in process and answers every agent call
//! from them. It backs the command-line tool, which reads and writes
//! [`UniverSnapshot`] JSON files, and the transfer tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use univer_bridge_protocol::{
    AgentError, AnchorPosition, BorderStyleData, BorderStyleType, BorderType, CellValue,
    ColorStyle, Comment, ConditionalFormatRule, FontHorizontalAlign, FontProperties,
    FontVerticalAlign, FormulaMatrix, Freeze, HorizontalAlign, ImageInfo, MergeStrategy, NewImage,
    NumberFormatPattern, RangeSpec, SheetInfo, SheetTransform, StyleData, TextDecoration,
    TextRotation, Transform, UniverAgent, User, UserDirectory, ValueMatrix, VerticalAlign,
    WrapStrategy,
};

use crate::units::{DEFAULT_COLUMN_WIDTH_PX, DEFAULT_ROW_HEIGHT_PX};

type AgentResult<T> = univer_bridge_protocol::Result<T>;

/// A whole Univer document with its session users
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UniverSnapshot {
    pub sheets: Vec<SheetSnapshot>,
    pub users: Vec<User>,
    /// Id of the user performing transfers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_user: Option<String>,
}

/// One stored cell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CellRecord {
    pub row: i32,
    pub column: i32,
    #[serde(skip_serializing_if = "CellValue::is_absent")]
    pub value: CellValue,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub formula: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleData>,
}

impl CellRecord {
    pub fn value(row: i32, column: i32, value: impl Into<CellValue>) -> Self {
        Self {
            row,
            column,
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn formula(row: i32, column: i32, formula: impl Into<String>) -> Self {
        Self {
            row,
            column,
            formula: formula.into(),
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: StyleData) -> Self {
        self.style = Some(style);
        self
    }
}

/// One sheet of a [`UniverSnapshot`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SheetSnapshot {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_color: Option<String>,
    /// Declared used range; computed from the cells when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_used: Option<RangeSpec>,
    pub cells: Vec<CellRecord>,
    pub merges: Vec<RangeSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<RangeSpec>,
    pub freeze: Freeze,
    pub comments: Vec<Comment>,
    pub images: Vec<ImageInfo>,
    pub conditional_formats: Vec<ConditionalFormatRule>,
    /// Column widths in pixels, by column index
    pub column_widths: BTreeMap<i32, f64>,
    /// Row heights in pixels, by row index
    pub row_heights: BTreeMap<i32, f64>,
}

impl SheetSnapshot {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_cell(mut self, cell: CellRecord) -> Self {
        self.cells.push(cell);
        self
    }

    /// The stored cell at `(row, column)`
    pub fn cell(&self, row: i32, column: i32) -> Option<&CellRecord> {
        self.cells.iter().find(|c| c.row == row && c.column == column)
    }
}

#[derive(Debug, Clone, Default)]
struct CellState {
    value: CellValue,
    formula: String,
    style: Option<StyleData>,
}

impl CellState {
    fn is_empty(&self) -> bool {
        self.value.is_absent() && self.formula.is_empty() && self.style.is_none()
    }
}

#[derive(Debug, Clone, Default)]
struct SheetState {
    id: String,
    name: String,
    tab_color: Option<String>,
    declared_used: Option<RangeSpec>,
    cells: BTreeMap<(i32, i32), CellState>,
    merges: Vec<RangeSpec>,
    filter: Option<RangeSpec>,
    freeze: Freeze,
    comments: Vec<Comment>,
    images: Vec<ImageInfo>,
    conditional_formats: Vec<ConditionalFormatRule>,
    column_widths: BTreeMap<i32, f64>,
    row_heights: BTreeMap<i32, f64>,
    next_image: usize,
}

impl SheetState {
    fn from_snapshot(snapshot: SheetSnapshot) -> Self {
        let cells = snapshot
            .cells
            .into_iter()
            .map(|c| {
                let state = CellState {
                    value: c.value,
                    formula: c.formula,
                    style: c.style,
                };
                ((c.row, c.column), state)
            })
            .collect();
        Self {
            id: snapshot.id,
            name: snapshot.name,
            tab_color: snapshot.tab_color,
            declared_used: snapshot.max_used,
            cells,
            merges: snapshot.merges,
            filter: snapshot.filter,
            freeze: snapshot.freeze,
            comments: snapshot.comments,
            next_image: snapshot.images.len(),
            images: snapshot.images,
            conditional_formats: snapshot.conditional_formats,
            column_widths: snapshot.column_widths,
            row_heights: snapshot.row_heights,
        }
    }

    fn to_snapshot(&self) -> SheetSnapshot {
        SheetSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            tab_color: self.tab_color.clone(),
            max_used: self.declared_used,
            cells: self
                .cells
                .iter()
                .filter(|(_, cell)| !cell.is_empty())
                .map(|(&(row, column), cell)| CellRecord {
                    row,
                    column,
                    value: cell.value.clone(),
                    formula: cell.formula.clone(),
                    style: cell.style.clone(),
                })
                .collect(),
            merges: self.merges.clone(),
            filter: self.filter,
            freeze: self.freeze,
            comments: self.comments.clone(),
            images: self.images.clone(),
            conditional_formats: self.conditional_formats.clone(),
            column_widths: self.column_widths.clone(),
            row_heights: self.row_heights.clone(),
        }
    }

    fn info(&self) -> SheetInfo {
        SheetInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            tab_color: self.tab_color.clone(),
            max_used: self.max_used(),
        }
    }

    /// Declared range, else the bounding box of stored cells, else A1
    fn max_used(&self) -> RangeSpec {
        if let Some(declared) = self.declared_used {
            return declared;
        }
        let mut keys = self
            .cells
            .iter()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(&key, _)| key);
        let Some((row, column)) = keys.next() else {
            return RangeSpec::single(0, 0);
        };
        keys.fold(RangeSpec::single(row, column), |used, (row, column)| {
            RangeSpec::new(
                used.start_row.min(row),
                used.end_row.max(row),
                used.start_column.min(column),
                used.end_column.max(column),
            )
        })
    }

    fn matrix<T>(&self, range: RangeSpec, read: impl Fn(Option<&CellState>) -> T) -> Vec<Vec<T>> {
        (range.start_row..=range.end_row)
            .map(|row| {
                (range.start_column..=range.end_column)
                    .map(|column| read(self.cells.get(&(row, column))))
                    .collect()
            })
            .collect()
    }

    fn cells_in(&mut self, range: RangeSpec) -> impl Iterator<Item = &mut CellState> + '_ {
        for row in range.start_row..=range.end_row {
            for column in range.start_column..=range.end_column {
                self.cells.entry((row, column)).or_default();
            }
        }
        self.cells
            .range_mut((range.start_row, range.start_column)..=(range.end_row, range.end_column))
            .filter(move |((_, column), _)| {
                (range.start_column..=range.end_column).contains(column)
            })
            .map(|(_, cell)| cell)
    }

    fn column_left(&self, column: i32) -> f64 {
        (0..column)
            .map(|c| self.column_widths.get(&c).copied().unwrap_or(DEFAULT_COLUMN_WIDTH_PX))
            .sum()
    }

    fn row_top(&self, row: i32) -> f64 {
        (0..row)
            .map(|r| self.row_heights.get(&r).copied().unwrap_or(DEFAULT_ROW_HEIGHT_PX))
            .sum()
    }
}

fn check_range(range: RangeSpec) -> AgentResult<()> {
    if range.start_row < 0
        || range.start_column < 0
        || range.end_row < range.start_row
        || range.end_column < range.start_column
    {
        return Err(AgentError::InvalidRange(format!("{range:?}")));
    }
    Ok(())
}

fn check_matrix<T>(range: RangeSpec, matrix: &[Vec<T>]) -> AgentResult<()> {
    check_range(range)?;
    let too_wide = matrix
        .iter()
        .any(|row| row.len() > range.column_count() as usize);
    if matrix.len() > range.row_count() as usize || too_wide {
        return Err(AgentError::InvalidRange(format!(
            "matrix does not fit {range:?}"
        )));
    }
    Ok(())
}

fn overlaps(a: &RangeSpec, b: &RangeSpec) -> bool {
    a.start_row <= b.end_row
        && b.start_row <= a.end_row
        && a.start_column <= b.end_column
        && b.start_column <= a.end_column
}

fn apply_font_properties(style: &mut StyleData, props: &FontProperties) {
    if let Some(family) = &props.family {
        style.ff = Some(family.clone());
    }
    if let Some(size) = props.size {
        style.fs = Some(size);
    }
    if let Some(bold) = props.bold {
        style.bl = Some(bold.into());
    }
    if let Some(italic) = props.italic {
        style.it = Some(italic.into());
    }
    if let Some(underline) = props.underline {
        style.ul = Some(TextDecoration::on(underline));
    }
    if let Some(strikethrough) = props.strikethrough {
        style.st = Some(TextDecoration::on(strikethrough));
    }
    if let Some(color) = &props.color {
        style.cl = Some(ColorStyle::rgb(color.clone()));
    }
    if let Some(color) = &props.background_color {
        style.bg = Some(ColorStyle::rgb(color.clone()));
    }
    if let Some(pattern) = &props.number_format {
        style.n = Some(NumberFormatPattern {
            pattern: pattern.clone(),
        });
    }
    if let Some(angle) = props.text_rotation {
        style.tr = Some(TextRotation { a: angle, v: None });
    }
    match (props.wrap_strategy, props.is_wrap) {
        (Some(strategy), _) => style.tb = Some(strategy),
        (None, Some(true)) => style.tb = Some(WrapStrategy::Wrap),
        (None, Some(false)) => style.tb = Some(WrapStrategy::Overflow),
        (None, None) => {}
    }
    if let Some(align) = props.horizontal_align {
        style.ht = Some(match align {
            FontHorizontalAlign::Left => HorizontalAlign::Left,
            FontHorizontalAlign::Center => HorizontalAlign::Center,
            FontHorizontalAlign::Normal => HorizontalAlign::Right,
        });
    }
    if let Some(align) = props.vertical_align {
        style.vt = Some(match align {
            FontVerticalAlign::Top => VerticalAlign::Top,
            FontVerticalAlign::Middle => VerticalAlign::Middle,
            FontVerticalAlign::Bottom => VerticalAlign::Bottom,
        });
    }
}

/// A Univer document held in memory
#[derive(Debug, Default)]
pub struct MemoryAgent {
    sheets: Mutex<Vec<SheetState>>,
}

impl MemoryAgent {
    /// An empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// A document holding the sheets of `snapshot`
    pub fn from_snapshot(snapshot: &UniverSnapshot) -> Self {
        Self::from_sheets(snapshot.sheets.clone())
    }

    pub fn from_sheets(sheets: Vec<SheetSnapshot>) -> Self {
        Self {
            sheets: Mutex::new(sheets.into_iter().map(SheetState::from_snapshot).collect()),
        }
    }

    /// Every sheet in tab order
    pub async fn sheets(&self) -> Vec<SheetSnapshot> {
        self.sheets.lock().await.iter().map(SheetState::to_snapshot).collect()
    }

    /// One sheet, looked up by id or name
    pub async fn sheet(&self, sheet: &str) -> Option<SheetSnapshot> {
        self.sheets
            .lock()
            .await
            .iter()
            .find(|s| s.id == sheet || s.name == sheet)
            .map(SheetState::to_snapshot)
    }

    async fn read<T>(&self, sheet: &str, f: impl FnOnce(&SheetState) -> AgentResult<T>) -> AgentResult<T> {
        let sheets = self.sheets.lock().await;
        let state = sheets
            .iter()
            .find(|s| s.id == sheet || s.name == sheet)
            .ok_or_else(|| AgentError::UnknownSheet(sheet.to_string()))?;
        f(state)
    }

    async fn write<T>(
        &self,
        sheet: &str,
        f: impl FnOnce(&mut SheetState) -> AgentResult<T>,
    ) -> AgentResult<T> {
        let mut sheets = self.sheets.lock().await;
        let state = sheets
            .iter_mut()
            .find(|s| s.id == sheet || s.name == sheet)
            .ok_or_else(|| AgentError::UnknownSheet(sheet.to_string()))?;
        f(state)
    }
}

#[async_trait]
impl UniverAgent for MemoryAgent {
    async fn sheets_info(&self) -> AgentResult<Vec<SheetInfo>> {
        Ok(self.sheets.lock().await.iter().map(SheetState::info).collect())
    }

    async fn values(&self, sheet: &str, range: RangeSpec) -> AgentResult<ValueMatrix> {
        check_range(range)?;
        self.read(sheet, |s| {
            Ok(s.matrix(range, |c| c.map(|c| c.value.clone()).unwrap_or_default()))
        })
        .await
    }

    async fn formulas(&self, sheet: &str, range: RangeSpec) -> AgentResult<FormulaMatrix> {
        check_range(range)?;
        self.read(sheet, |s| {
            Ok(s.matrix(range, |c| c.map(|c| c.formula.clone()).unwrap_or_default()))
        })
        .await
    }

    async fn styles(
        &self,
        sheet: &str,
        range: RangeSpec,
    ) -> AgentResult<Vec<Vec<Option<StyleData>>>> {
        check_range(range)?;
        self.read(sheet, |s| Ok(s.matrix(range, |c| c.and_then(|c| c.style.clone()))))
            .await
    }

    async fn merges(&self, sheet: &str) -> AgentResult<Vec<RangeSpec>> {
        self.read(sheet, |s| Ok(s.merges.clone())).await
    }

    async fn filter(&self, sheet: &str) -> AgentResult<Option<RangeSpec>> {
        self.read(sheet, |s| Ok(s.filter)).await
    }

    async fn freeze(&self, sheet: &str) -> AgentResult<Freeze> {
        self.read(sheet, |s| Ok(s.freeze)).await
    }

    async fn comments(&self, sheet: &str) -> AgentResult<Vec<Comment>> {
        self.read(sheet, |s| Ok(s.comments.clone())).await
    }

    async fn image_ids(&self, sheet: &str) -> AgentResult<Vec<String>> {
        self.read(sheet, |s| Ok(s.images.iter().map(|i| i.id.clone()).collect()))
            .await
    }

    async fn image(&self, sheet: &str, id: &str) -> AgentResult<ImageInfo> {
        self.read(sheet, |s| {
            s.images
                .iter()
                .find(|i| i.id == id)
                .map(|i| ImageInfo {
                    source: String::new(),
                    ..i.clone()
                })
                .ok_or_else(|| AgentError::Rejected(format!("no image {id}")))
        })
        .await
    }

    async fn image_source(&self, sheet: &str, id: &str) -> AgentResult<String> {
        self.read(sheet, |s| {
            s.images
                .iter()
                .find(|i| i.id == id)
                .map(|i| i.source.clone())
                .ok_or_else(|| AgentError::Rejected(format!("no image {id}")))
        })
        .await
    }

    async fn column_widths(&self, sheet: &str, columns: &[i32]) -> AgentResult<Vec<f64>> {
        self.read(sheet, |s| {
            Ok(columns
                .iter()
                .map(|c| s.column_widths.get(c).copied().unwrap_or(DEFAULT_COLUMN_WIDTH_PX))
                .collect())
        })
        .await
    }

    async fn row_heights(&self, sheet: &str, rows: &[i32]) -> AgentResult<Vec<f64>> {
        self.read(sheet, |s| {
            Ok(rows
                .iter()
                .map(|r| s.row_heights.get(r).copied().unwrap_or(DEFAULT_ROW_HEIGHT_PX))
                .collect())
        })
        .await
    }

    async fn conditional_formats(&self, sheet: &str) -> AgentResult<Vec<ConditionalFormatRule>> {
        self.read(sheet, |s| Ok(s.conditional_formats.clone())).await
    }

    async fn add_sheet(
        &self,
        name: &str,
        row_count: i32,
        column_count: i32,
        tab_color: Option<&str>,
    ) -> AgentResult<SheetInfo> {
        if row_count < 1 || column_count < 1 {
            return Err(AgentError::InvalidRange(format!(
                "sheet of {row_count} x {column_count} cells"
            )));
        }

        let mut sheets = self.sheets.lock().await;
        if sheets.iter().any(|s| s.name == name) {
            return Err(AgentError::Rejected(format!("sheet '{name}' already exists")));
        }
        let mut number = sheets.len() + 1;
        while sheets.iter().any(|s| s.id == format!("sheet-{number}")) {
            number += 1;
        }

        let state = SheetState {
            id: format!("sheet-{number}"),
            name: name.to_string(),
            tab_color: tab_color.map(str::to_string),
            declared_used: Some(RangeSpec::new(0, row_count - 1, 0, column_count - 1)),
            ..Default::default()
        };
        let info = state.info();
        sheets.push(state);
        Ok(info)
    }

    async fn set_values(&self, sheet: &str, range: RangeSpec, values: ValueMatrix) -> AgentResult<()> {
        check_matrix(range, &values)?;
        self.write(sheet, |s| {
            for (r, row) in values.into_iter().enumerate() {
                for (c, value) in row.into_iter().enumerate() {
                    let key = (range.start_row + r as i32, range.start_column + c as i32);
                    if value.is_absent() && !s.cells.contains_key(&key) {
                        continue;
                    }
                    s.cells.entry(key).or_default().value = value;
                }
            }
            Ok(())
        })
        .await
    }

    async fn set_formulas(
        &self,
        sheet: &str,
        range: RangeSpec,
        formulas: FormulaMatrix,
    ) -> AgentResult<()> {
        check_matrix(range, &formulas)?;
        self.write(sheet, |s| {
            for (r, row) in formulas.into_iter().enumerate() {
                for (c, formula) in row.into_iter().enumerate() {
                    if formula.is_empty() {
                        continue;
                    }
                    let key = (range.start_row + r as i32, range.start_column + c as i32);
                    let cell = s.cells.entry(key).or_default();
                    cell.formula = formula;
                    cell.value = CellValue::Absent;
                }
            }
            Ok(())
        })
        .await
    }

    async fn set_font_properties(
        &self,
        sheet: &str,
        range: RangeSpec,
        properties: &FontProperties,
    ) -> AgentResult<()> {
        check_range(range)?;
        self.write(sheet, |s| {
            for cell in s.cells_in(range) {
                apply_font_properties(cell.style.get_or_insert_with(Default::default), properties);
            }
            Ok(())
        })
        .await
    }

    async fn set_border_style(
        &self,
        sheet: &str,
        range: RangeSpec,
        border: BorderType,
        style: BorderStyleType,
        color: &str,
    ) -> AgentResult<()> {
        check_range(range)?;
        self.write(sheet, |s| {
            for cell in s.cells_in(range) {
                let edges = cell
                    .style
                    .get_or_insert_with(Default::default)
                    .bd
                    .get_or_insert_with(Default::default);
                let slot = match border {
                    BorderType::Top => &mut edges.t,
                    BorderType::Bottom => &mut edges.b,
                    BorderType::Left => &mut edges.l,
                    BorderType::Right => &mut edges.r,
                    BorderType::Tlbr => &mut edges.tl_br,
                    BorderType::Bltr => &mut edges.bl_tr,
                };
                *slot = Some(BorderStyleData {
                    s: Some(style),
                    cl: ColorStyle::rgb(color),
                });
            }
            Ok(())
        })
        .await
    }

    async fn merge(&self, sheet: &str, range: RangeSpec, strategy: MergeStrategy) -> AgentResult<()> {
        check_range(range)?;
        self.write(sheet, |s| {
            for region in strategy.regions(range) {
                if s.merges.iter().any(|m| overlaps(m, &region)) {
                    return Err(AgentError::Rejected(format!(
                        "{region:?} overlaps an existing merge"
                    )));
                }
                s.merges.push(region);
            }
            Ok(())
        })
        .await
    }

    async fn create_filter(&self, sheet: &str, range: RangeSpec) -> AgentResult<()> {
        check_range(range)?;
        self.write(sheet, |s| {
            s.filter = Some(range);
            Ok(())
        })
        .await
    }

    async fn set_freeze(&self, sheet: &str, rows: u32, columns: u32) -> AgentResult<()> {
        let freeze = if rows == 0 && columns == 0 {
            Freeze::NONE
        } else {
            let invalid = || AgentError::InvalidRange(format!("freeze of {rows} x {columns}"));
            Freeze {
                start_row: i32::try_from(rows).map_err(|_| invalid())?,
                start_column: i32::try_from(columns).map_err(|_| invalid())?,
                x_split: 0,
                y_split: 0,
            }
        };
        self.write(sheet, |s| {
            s.freeze = freeze;
            Ok(())
        })
        .await
    }

    async fn insert_comment(&self, sheet: &str, comment: Comment) -> AgentResult<()> {
        RangeSpec::parse_a1(&comment.reference)?;
        self.write(sheet, |s| {
            s.comments.push(comment);
            Ok(())
        })
        .await
    }

    async fn add_image(&self, sheet: &str, image: NewImage) -> AgentResult<()> {
        check_range(RangeSpec::single(image.row, image.column))?;
        self.write(sheet, |s| {
            s.next_image += 1;
            let left = s.column_left(image.column) + image.column_offset;
            let top = s.row_top(image.row) + image.row_offset;
            let anchor = AnchorPosition {
                column: image.column,
                column_offset: image.column_offset,
                row: image.row,
                row_offset: image.row_offset,
            };
            s.images.push(ImageInfo {
                id: format!("img-{}", s.next_image),
                sheet_transform: SheetTransform {
                    from: anchor,
                    to: anchor,
                },
                transform: Transform {
                    left,
                    top,
                    width: image.width,
                    height: image.height,
                },
                source: image.source,
            });
            Ok(())
        })
        .await
    }

    async fn add_conditional_format(
        &self,
        sheet: &str,
        rule: ConditionalFormatRule,
    ) -> AgentResult<()> {
        for range in &rule.ranges {
            check_range(*range)?;
        }
        self.write(sheet, |s| {
            s.conditional_formats.push(rule);
            Ok(())
        })
        .await
    }

    async fn set_column_width(&self, sheet: &str, column: i32, width: f64) -> AgentResult<()> {
        check_range(RangeSpec::single(0, column))?;
        self.write(sheet, |s| {
            s.column_widths.insert(column, width);
            Ok(())
        })
        .await
    }

    async fn set_row_height(&self, sheet: &str, row: i32, height: f64) -> AgentResult<()> {
        check_range(RangeSpec::single(row, 0))?;
        self.write(sheet, |s| {
            s.row_heights.insert(row, height);
            Ok(())
        })
        .await
    }
}

/// Session users held in memory
#[derive(Debug, Clone)]
pub struct MemoryUsers {
    current: String,
    users: BTreeMap<String, User>,
}

impl Default for MemoryUsers {
    fn default() -> Self {
        Self::new(User::new("local", "Local User"))
    }
}

impl MemoryUsers {
    /// A directory whose only member is `current`
    pub fn new(current: User) -> Self {
        let id = current.user_id.clone();
        Self {
            current: id.clone(),
            users: BTreeMap::from([(id, current)]),
        }
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.user_id.clone(), user);
        self
    }

    /// Users of `snapshot`; the current user falls back to the first listed
    pub fn from_snapshot(snapshot: &UniverSnapshot) -> Self {
        let current = snapshot
            .current_user
            .as_ref()
            .and_then(|id| snapshot.users.iter().find(|u| &u.user_id == id))
            .or_else(|| snapshot.users.first())
            .cloned();
        let directory = current.map_or_else(Self::default, Self::new);
        snapshot
            .users
            .iter()
            .cloned()
            .fold(directory, |directory, user| directory.with_user(user))
    }

    /// Every member, ordered by id
    pub fn users(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    pub fn current_user_id(&self) -> &str {
        &self.current
    }
}

#[async_trait]
impl UserDirectory for MemoryUsers {
    async fn user(&self, id: &str) -> AgentResult<User> {
        self.users
            .get(id)
            .cloned()
            .ok_or_else(|| AgentError::UnknownUser(id.to_string()))
    }

    async fn current_user(&self) -> AgentResult<User> {
        self.user(&self.current).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use univer_bridge_core::style::{Color, Style, Theme};

    fn agent() -> MemoryAgent {
        MemoryAgent::from_sheets(vec![SheetSnapshot::new("s1", "Data")
            .with_cell(CellRecord::value(0, 0, 42.0))
            .with_cell(CellRecord::formula(2, 1, "=A1*2"))])
    }

    #[tokio::test]
    async fn test_used_range_is_computed() {
        let info = agent().sheets_info().await.unwrap();
        assert_eq!(info[0].max_used, RangeSpec::new(0, 2, 0, 1));
    }

    #[tokio::test]
    async fn test_reads_return_the_requested_block() {
        let agent = agent();
        let values = agent.values("s1", RangeSpec::new(0, 3, 0, 1)).await.unwrap();
        assert_eq!(values.len(), 4);
        assert_eq!(values[0], vec![CellValue::Number(42.0), CellValue::Absent]);

        let formulas = agent.formulas("Data", RangeSpec::new(2, 2, 0, 1)).await.unwrap();
        assert_eq!(formulas, vec![vec![String::new(), "=A1*2".to_string()]]);
    }

    #[tokio::test]
    async fn test_unknown_sheet_and_bad_range() {
        let agent = agent();
        assert!(matches!(
            agent.merges("nope").await,
            Err(AgentError::UnknownSheet(_))
        ));
        assert!(matches!(
            agent.values("s1", RangeSpec::new(2, 1, 0, 0)).await,
            Err(AgentError::InvalidRange(_))
        ));
    }

    #[tokio::test]
    async fn test_add_sheet_declares_its_size() {
        let agent = MemoryAgent::new();
        let info = agent.add_sheet("Report", 10, 3, Some("#FF0000FF")).await.unwrap();
        assert_eq!(info.max_used, RangeSpec::new(0, 9, 0, 2));
        assert!(matches!(
            agent.add_sheet("Report", 1, 1, None).await,
            Err(AgentError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_font_properties_and_borders_merge_into_style() {
        let agent = agent();
        let cell = RangeSpec::single(1, 1);
        let props = FontProperties {
            bold: Some(true),
            horizontal_align: Some(FontHorizontalAlign::Center),
            is_wrap: Some(true),
            ..Default::default()
        };
        agent.set_font_properties("s1", cell, &props).await.unwrap();
        agent
            .set_border_style("s1", cell, BorderType::Bltr, BorderStyleType::Thin, "#000000")
            .await
            .unwrap();

        let styles = agent.styles("s1", cell).await.unwrap();
        let style = styles[0][0].clone().unwrap();
        assert_eq!(style.bl, Some(true.into()));
        assert_eq!(style.ht, Some(HorizontalAlign::Center));
        assert_eq!(style.tb, Some(WrapStrategy::Wrap));
        assert_eq!(
            style.bd.and_then(|bd| bd.bl_tr),
            Some(BorderStyleData {
                s: Some(BorderStyleType::Thin),
                cl: ColorStyle::rgb("#000000"),
            })
        );
    }

    /// Send a workbook style through the agent the way the import Styles
    /// stage does and read it back the way the export Styles stage does
    async fn through_agent(style: &Style, reference: &Style, theme: &Theme) -> Style {
        let agent = MemoryAgent::from_sheets(vec![SheetSnapshot::new("s1", "Data")]);
        let cell = RangeSpec::single(0, 0);
        let props = crate::style::font_properties(style, reference, theme);
        agent.set_font_properties("s1", cell, &props).await.unwrap();
        for setting in crate::style::border_settings(style, reference, theme) {
            agent
                .set_border_style("s1", cell, setting.border, setting.style, &setting.color)
                .await
                .unwrap();
        }

        let data = agent.styles("s1", cell).await.unwrap()[0][0].clone().unwrap();
        let mut read_back = reference.clone();
        crate::style::apply_style_data(&mut read_back, &data).unwrap();
        read_back
    }

    #[tokio::test]
    async fn test_default_style_reads_back_as_default() {
        let theme = Theme::default();
        let reference = Style::default();
        for style in [
            Style::default(),
            Style::new().font_color(Color::BLACK),
            Style::new().bold(false).italic(false),
        ] {
            let read_back = through_agent(&style, &reference, &theme).await;
            assert!(crate::defaults::is_default(&read_back, &reference, &theme));
            assert_eq!(read_back, reference);
        }
    }

    #[tokio::test]
    async fn test_only_changed_attributes_survive_the_round_trip() {
        let theme = Theme::default();
        let reference = Style::default();
        let style = Style::new().bold(true);

        let read_back = through_agent(&style, &reference, &theme).await;
        assert_eq!(
            crate::defaults::differing_attributes(&read_back, &reference, &theme),
            vec![crate::defaults::StyleAttribute::Bold]
        );
        assert!(read_back.font.bold);
    }

    #[tokio::test]
    async fn test_merge_overlap_rejected() {
        let agent = agent();
        agent
            .merge("s1", RangeSpec::new(0, 1, 0, 1), MergeStrategy::All)
            .await
            .unwrap();
        assert!(agent
            .merge("s1", RangeSpec::new(1, 2, 1, 2), MergeStrategy::All)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_freeze_and_images() {
        let agent = agent();
        agent.set_freeze("s1", 0, 0).await.unwrap();
        assert!(agent.freeze("s1").await.unwrap().is_none());
        agent.set_freeze("s1", 2, 1).await.unwrap();
        let freeze = agent.freeze("s1").await.unwrap();
        assert_eq!((freeze.frozen_rows(), freeze.frozen_columns()), (2, 1));

        let image = NewImage {
            source: "data:image/png;base64,iVBO".into(),
            row: 1,
            column: 2,
            column_offset: 4.0,
            row_offset: 0.0,
            width: 100.0,
            height: 50.0,
        };
        agent.add_image("s1", image).await.unwrap();
        let ids = agent.image_ids("s1").await.unwrap();
        assert_eq!(ids, vec!["img-1".to_string()]);
        let info = agent.image("s1", "img-1").await.unwrap();
        assert!(info.source.is_empty());
        assert_eq!(info.transform.left, 180.0);
        assert_eq!(info.transform.top, 24.0);
        assert_eq!(
            agent.image_source("s1", "img-1").await.unwrap(),
            "data:image/png;base64,iVBO"
        );
    }

    #[tokio::test]
    async fn test_users() {
        let users = MemoryUsers::new(User::new("u1", "Ada")).with_user(User::new("u2", "Grace"));
        assert_eq!(users.current_user().await.unwrap().name, "Ada");
        assert_eq!(users.user("u2").await.unwrap().name, "Grace");
        assert!(matches!(users.user("u3").await, Err(AgentError::UnknownUser(_))));

        let snapshot = UniverSnapshot {
            users: vec![User::new("a", "A"), User::new("b", "B")],
            current_user: Some("b".into()),
            ..Default::default()
        };
        assert_eq!(MemoryUsers::from_snapshot(&snapshot).current_user_id(), "b");
    }

    #[test]
    fn test_snapshot_json() {
        let json = r#"{
            "sheets": [{
                "id": "s1", "name": "Data",
                "cells": [{"row": 0, "column": 0, "value": 42}],
                "freeze": {"startRow": -1, "startColumn": -1, "xSplit": 0, "ySplit": 0}
            }],
            "users": [{"userId": "u1", "name": "Ada"}]
        }"#;
        let snapshot: UniverSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(
            snapshot.sheets[0].cell(0, 0).map(|c| c.value.clone()),
            Some(CellValue::Number(42.0))
        );
        assert!(snapshot.sheets[0].freeze.is_none());
    }
}
