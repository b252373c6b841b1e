use super::*;

pub mod grid;

pub use grid::{Column, Row, Track};

/// Where a child sits in its parent's grid.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RowColumnPosition {
    pub row: u32,
    pub column: u32,
    pub row_span: u32,
    pub column_span: u32,
}

impl Default for RowColumnPosition {
    fn default() -> Self {
        Self::cell(0, 0)
    }
}

impl RowColumnPosition {
    pub const fn cell(row: u32, column: u32) -> Self {
        Self {
            row,
            column,
            row_span: 1,
            column_span: 1,
        }
    }

    pub const fn spanning(row: u32, column: u32, row_span: u32, column_span: u32) -> Self {
        Self {
            row,
            column,
            row_span,
            column_span,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Margin {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Margin {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical)
    }
}

/// Border thickness per edge. The border is drawn between the margin and the
/// grid, so it takes space away from the rows and columns.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BorderWidths {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BorderWidths {
    pub const fn all(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

/// How far each corner of the border outline is cut in, along each axis.
/// Used for tab-like shapes.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BorderOffsets {
    pub top_left_x: f32,
    pub top_left_y: f32,
    pub top_right_x: f32,
    pub top_right_y: f32,
    pub bottom_left_x: f32,
    pub bottom_left_y: f32,
    pub bottom_right_x: f32,
    pub bottom_right_y: f32,
}

/// An item that participates in a Layout.
pub enum LayoutItem {
    /// The item is a nested layout.
    Layout(Box<Layout>),
    /// The item is a control.
    Control(Box<dyn Control>),
}

impl core::fmt::Debug for LayoutItem {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::Layout(nested_layout) => fmt.debug_tuple("Layout").field(nested_layout).finish(),
            Self::Control(control) => fmt.debug_tuple("Control").field(control).finish(),
        }
    }
}

impl LayoutItem {
    pub fn name(&self) -> &str {
        match self {
            Self::Layout(layout) => &layout.name,
            Self::Control(control) => &control.name,
        }
    }

    pub fn id(&self) -> Option<u32> {
        match self {
            Self::Layout(layout) => layout.id,
            Self::Control(control) => control.id,
        }
    }

    pub fn as_layout(&self) -> Option<&Layout> {
        match self {
            Self::Layout(layout) => Some(&**layout),
            Self::Control(_) => None,
        }
    }

    pub fn as_control(&self) -> Option<&dyn Control> {
        match self {
            Self::Layout(_) => None,
            Self::Control(control) => Some(&**control),
        }
    }

    pub(crate) fn place(&mut self, rect: Rect) {
        match self {
            Self::Layout(nested_layout) => nested_layout.resolve(rect),
            Self::Control(control) => control.set_viewport(rect),
        }
    }
}

#[derive(Debug)]
pub struct LayoutChild {
    pub position: RowColumnPosition,
    pub item: LayoutItem,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Axis {
    Rows,
    Columns,
}

/// Which edge of a row (column) is being dragged.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Edge {
    /// Top of a row, left of a column.
    Leading,
    /// Bottom of a row, right of a column.
    Trailing,
}

/// A draggable edge of one row or column.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Boundary {
    pub axis: Axis,
    pub index: usize,
    pub edge: Edge,
}

/// A grid of rows and columns hosting controls and nested layouts.
#[derive(Debug, Default)]
pub struct Layout {
    pub(crate) name: String,
    pub(crate) id: Option<u32>,
    pub(crate) rows: Vec<Row>,
    pub(crate) columns: Vec<Column>,
    pub(crate) children: Vec<LayoutChild>,
    pub margin: Margin,
    pub border_widths: BorderWidths,
    pub border_offsets: BorderOffsets,
    pub background: Option<Rc<Brush>>,
    pub border_brush: Option<Rc<Brush>>,
    /// Name of the application handler to run after this layout is resized.
    pub on_resize: Option<String>,

    available: Rect,
    content: Rect,
    inner: Rect,
}

impl Layout {
    /// An empty layout. Rows and columns must be added before children can be
    /// placed.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// A layout with a single star row and column.
    pub fn single_cell(name: &str) -> Self {
        let mut layout = Self::new(name);
        layout.fill_default_lines();
        layout
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<u32> {
        self.id
    }

    pub fn set_id(&mut self, id: Option<u32>) {
        self.id = id;
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn children(&self) -> &[LayoutChild] {
        &self.children
    }

    pub fn add_row(&mut self, row: Row) -> &mut Self {
        self.rows.push(row);
        self
    }

    pub fn add_column(&mut self, column: Column) -> &mut Self {
        self.columns.push(column);
        self
    }

    /// Gives a layout without row (column) definitions its single star row
    /// (column).
    pub(crate) fn fill_default_lines(&mut self) {
        if self.rows.is_empty() {
            self.rows.push(Row::new(SizingValue::star(1.0)));
        }
        if self.columns.is_empty() {
            self.columns.push(Column::new(SizingValue::star(1.0)));
        }
    }

    /// Checks a position against the grid. Zero spans become one and spans
    /// running past the last row (column) are clipped; a start cell outside
    /// the grid is an error.
    pub fn fit_position(&self, position: RowColumnPosition) -> Result<RowColumnPosition> {
        let rows = self.rows.len();
        let columns = self.columns.len();
        if position.row as usize >= rows || position.column as usize >= columns {
            return Err(Error::OutOfGrid {
                row: position.row,
                column: position.column,
                rows,
                columns,
            });
        }

        let mut fitted = position;
        if fitted.row_span == 0 {
            warn!("{}: row span of 0 treated as 1", self.name);
            fitted.row_span = 1;
        }
        if fitted.column_span == 0 {
            warn!("{}: column span of 0 treated as 1", self.name);
            fitted.column_span = 1;
        }

        let max_row_span = (rows - fitted.row as usize) as u32;
        if fitted.row_span > max_row_span {
            warn!(
                "{}: row span {} at row {} clipped to {}",
                self.name, fitted.row_span, fitted.row, max_row_span
            );
            fitted.row_span = max_row_span;
        }
        let max_column_span = (columns - fitted.column as usize) as u32;
        if fitted.column_span > max_column_span {
            warn!(
                "{}: column span {} at column {} clipped to {}",
                self.name, fitted.column_span, fitted.column, max_column_span
            );
            fitted.column_span = max_column_span;
        }
        Ok(fitted)
    }

    pub fn add_control(
        &mut self,
        position: RowColumnPosition,
        control: Box<dyn Control>,
    ) -> Result<&mut dyn Control> {
        let position = self.fit_position(position)?;
        self.children.push(LayoutChild {
            position,
            item: LayoutItem::Control(control),
        });
        match self.children.last_mut().map(|c| &mut c.item) {
            Some(LayoutItem::Control(control)) => Ok(&mut **control),
            _ => unreachable!(),
        }
    }

    pub fn add_sub_layout(
        &mut self,
        position: RowColumnPosition,
        layout: Layout,
    ) -> Result<&mut Layout> {
        let position = self.fit_position(position)?;
        self.children.push(LayoutChild {
            position,
            item: LayoutItem::Layout(Box::new(layout)),
        });
        match self.children.last_mut().map(|c| &mut c.item) {
            Some(LayoutItem::Layout(layout)) => Ok(&mut **layout),
            _ => unreachable!(),
        }
    }

    /// The rectangle this layout was last resolved against.
    pub fn available_rect(&self) -> Rect {
        self.available
    }

    /// Available rectangle minus margin; the border's outer edge.
    pub fn content_rect(&self) -> Rect {
        self.content
    }

    /// Content rectangle minus border; the area rows and columns divide.
    pub fn inner_rect(&self) -> Rect {
        self.inner
    }

    /// Computes the geometry of this layout and everything below it.
    pub fn resolve(&mut self, available: Rect) {
        self.available = available;

        let m = self.margin;
        self.content = available.deflate(m.left, m.top, m.right, m.bottom);
        let b = self.border_widths;
        self.inner = self.content.deflate(b.left, b.top, b.right, b.bottom);

        let inner = self.inner;
        grid::resolve_axis(
            self.columns.iter_mut().map(|c| &mut **c),
            inner.left,
            inner.width(),
        );
        grid::resolve_axis(
            self.rows.iter_mut().map(|r| &mut **r),
            inner.top,
            inner.height(),
        );

        let (rows, columns) = (&self.rows, &self.columns);
        for child in self.children.iter_mut() {
            match span_rect(rows, columns, &child.position) {
                Some(rect) => child.item.place(rect),
                None => warn!(
                    "{}: child {:?} lies outside the grid",
                    self.name,
                    child.item.name()
                ),
            }
        }

        trace!(
            "resolved layout {:?}: available {:?}, inner {:?}",
            self.name,
            available,
            inner
        );
    }

    /// Outline of the border's outer edge, clockwise from the top-left
    /// corner, with each corner cut in by its offsets.
    pub fn border_polygon(&self) -> [Point; 8] {
        let r = self.content;
        let o = &self.border_offsets;
        [
            Point::new(r.left + o.top_left_x, r.top),
            Point::new(r.right - o.top_right_x, r.top),
            Point::new(r.right, r.top + o.top_right_y),
            Point::new(r.right, r.bottom - o.bottom_right_y),
            Point::new(r.right - o.bottom_right_x, r.bottom),
            Point::new(r.left + o.bottom_left_x, r.bottom),
            Point::new(r.left, r.bottom - o.bottom_left_y),
            Point::new(r.left, r.top + o.top_left_y),
        ]
    }

    fn track_mut(&mut self, axis: Axis, index: usize) -> Option<&mut Track> {
        match axis {
            Axis::Rows => self.rows.get_mut(index).map(|r| &mut **r),
            Axis::Columns => self.columns.get_mut(index).map(|c| &mut **c),
        }
    }

    pub fn is_adjustable(&self, boundary: Boundary) -> bool {
        let flags = match boundary.axis {
            Axis::Rows => self
                .rows
                .get(boundary.index)
                .map(|r| (r.top_adjustable, r.bottom_adjustable)),
            Axis::Columns => self
                .columns
                .get(boundary.index)
                .map(|c| (c.left_adjustable, c.right_adjustable)),
        };
        match (flags, boundary.edge) {
            (Some((lead, _)), Edge::Leading) => lead,
            (Some((_, trail)), Edge::Trailing) => trail,
            (None, _) => false,
        }
    }

    /// Index of the row or column a drag on `boundary` resizes: the line
    /// whose trailing edge the boundary is. The leading edge of the first
    /// line has none.
    fn resized_line(boundary: Boundary) -> Option<usize> {
        match boundary.edge {
            Edge::Trailing => Some(boundary.index),
            Edge::Leading => boundary.index.checked_sub(1),
        }
    }

    /// Resolved size of the row or column a drag on `boundary` resizes.
    pub fn line_size(&self, boundary: Boundary) -> Option<f32> {
        let index = Self::resized_line(boundary)?;
        match boundary.axis {
            Axis::Rows => self.rows.get(index).map(|r| r.size()),
            Axis::Columns => self.columns.get(index).map(|c| c.size()),
        }
    }

    /// Sets the row or column ending at an adjustable boundary to a fixed
    /// size, clamped to its limits, and re-resolves this layout against the
    /// rectangle it was last given. Returns false, changing nothing, if the
    /// boundary is not adjustable.
    pub fn set_line_size(&mut self, boundary: Boundary, size: f32) -> bool {
        if !self.is_adjustable(boundary) {
            return false;
        }
        let Some(index) = Self::resized_line(boundary) else {
            return false;
        };
        let Some(track) = self.track_mut(boundary.axis, index) else {
            return false;
        };
        let size = track.clamp_drag(size);
        track.sizing = SizingValue::fixed(size);
        debug!("{}: {:?} {} set to {} px", self.name, boundary.axis, index, size);

        let available = self.available;
        self.resolve(available);
        true
    }

    /// Moves a boundary by `delta` pixels; positive deltas move it down
    /// (right). The line before the boundary absorbs the change.
    pub fn drag_boundary(&mut self, boundary: Boundary, delta: f32) -> bool {
        let Some(size) = self.line_size(boundary) else {
            return false;
        };
        self.set_line_size(boundary, size + delta)
    }

    /// Finds the adjustable boundary within `tolerance` pixels of `pt`,
    /// searching nested layouts first. Returns the child-index path to the
    /// layout that owns it.
    pub fn boundary_at(&self, pt: Point, tolerance: f32) -> Option<(Vec<usize>, Boundary)> {
        for (i, child) in self.children.iter().enumerate() {
            if let LayoutItem::Layout(nested) = &child.item {
                if nested.available.contains(pt) {
                    if let Some((mut path, boundary)) = nested.boundary_at(pt, tolerance) {
                        path.insert(0, i);
                        return Some((path, boundary));
                    }
                }
            }
        }

        let inner = self.inner;
        let near = |edge: f32, along: f32| (along - edge).abs() <= tolerance;

        if pt.x >= inner.left && pt.x <= inner.right {
            for (index, row) in self.rows.iter().enumerate() {
                if row.top_adjustable && near(row.offset(), pt.y) {
                    return Some((vec![], Boundary { axis: Axis::Rows, index, edge: Edge::Leading }));
                }
                if row.bottom_adjustable && near(row.end(), pt.y) {
                    return Some((vec![], Boundary { axis: Axis::Rows, index, edge: Edge::Trailing }));
                }
            }
        }
        if pt.y >= inner.top && pt.y <= inner.bottom {
            for (index, column) in self.columns.iter().enumerate() {
                if column.left_adjustable && near(column.offset(), pt.x) {
                    return Some((vec![], Boundary { axis: Axis::Columns, index, edge: Edge::Leading }));
                }
                if column.right_adjustable && near(column.end(), pt.x) {
                    return Some((vec![], Boundary { axis: Axis::Columns, index, edge: Edge::Trailing }));
                }
            }
        }
        None
    }

    pub fn layout_at_path(&self, path: &[usize]) -> Option<&Layout> {
        let Some((first, rest)) = path.split_first() else {
            return Some(self);
        };
        match &self.children.get(*first)?.item {
            LayoutItem::Layout(nested) => nested.layout_at_path(rest),
            LayoutItem::Control(_) => None,
        }
    }

    pub fn layout_at_path_mut(&mut self, path: &[usize]) -> Option<&mut Layout> {
        let Some((first, rest)) = path.split_first() else {
            return Some(self);
        };
        match &mut self.children.get_mut(*first)?.item {
            LayoutItem::Layout(nested) => nested.layout_at_path_mut(rest),
            LayoutItem::Control(_) => None,
        }
    }

    pub fn control_at_path_mut(&mut self, path: &[usize]) -> Option<&mut dyn Control> {
        let (last, parent) = path.split_last()?;
        let layout = self.layout_at_path_mut(parent)?;
        match &mut layout.children.get_mut(*last)?.item {
            LayoutItem::Control(control) => Some(&mut **control),
            LayoutItem::Layout(_) => None,
        }
    }

    /// Child-index path of the control whose viewport contains `pt`.
    pub fn control_path_at(&self, pt: Point) -> Option<Vec<usize>> {
        for (i, child) in self.children.iter().enumerate() {
            let found = match &child.item {
                LayoutItem::Control(control) if control.viewport.contains(pt) => Some(vec![]),
                LayoutItem::Layout(nested) if nested.available.contains(pt) => {
                    nested.control_path_at(pt)
                }
                _ => None,
            };
            if let Some(mut path) = found {
                path.insert(0, i);
                return Some(path);
            }
        }
        None
    }

    pub fn control_at(&self, pt: Point) -> Option<&dyn Control> {
        let path = self.control_path_at(pt)?;
        let (last, parent) = path.split_last()?;
        self.layout_at_path(parent)?.children.get(*last)?.item.as_control()
    }

    /// Depth-first search for a control by name.
    pub fn find_control(&self, name: &str) -> Option<&dyn Control> {
        self.find_item(&|item| matches!(item, LayoutItem::Control(c) if c.name == name))
            .and_then(LayoutItem::as_control)
    }

    pub fn find_control_mut(&mut self, name: &str) -> Option<&mut dyn Control> {
        for child in self.children.iter_mut() {
            match &mut child.item {
                LayoutItem::Control(control) if control.name == name => return Some(&mut **control),
                LayoutItem::Layout(nested) => {
                    if let Some(found) = nested.find_control_mut(name) {
                        return Some(found);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Depth-first search for a nested layout by name, including this one.
    pub fn find_layout(&self, name: &str) -> Option<&Layout> {
        if self.name == name {
            return Some(self);
        }
        self.find_item(&|item| matches!(item, LayoutItem::Layout(l) if l.name == name))
            .and_then(LayoutItem::as_layout)
    }

    /// Depth-first search of the descendants for an `id`.
    pub fn find_by_id(&self, id: u32) -> Option<&LayoutItem> {
        self.find_item(&|item| item.id() == Some(id))
    }

    fn find_item(&self, pred: &dyn Fn(&LayoutItem) -> bool) -> Option<&LayoutItem> {
        for child in self.children.iter() {
            if pred(&child.item) {
                return Some(&child.item);
            }
            if let LayoutItem::Layout(nested) = &child.item {
                if let Some(found) = nested.find_item(pred) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Calls `f` for every control in the tree, in depth-first order.
    pub fn visit_controls(&self, f: &mut dyn FnMut(&dyn Control)) {
        for child in self.children.iter() {
            match &child.item {
                LayoutItem::Control(control) => f(&**control),
                LayoutItem::Layout(nested) => nested.visit_controls(f),
            }
        }
    }

    /// Calls `f` for this layout and every nested layout, parents first.
    pub fn visit_layouts(&self, f: &mut dyn FnMut(&Layout)) {
        f(self);
        for child in self.children.iter() {
            if let LayoutItem::Layout(nested) = &child.item {
                nested.visit_layouts(f);
            }
        }
    }
}

fn cell_rect(rows: &[Row], columns: &[Column], row: usize, column: usize) -> Option<Rect> {
    let (row, column) = (rows.get(row)?, columns.get(column)?);
    Some(Rect::new(column.offset(), row.offset(), column.end(), row.end()))
}

/// The union of the cells covered by `position`.
fn span_rect(rows: &[Row], columns: &[Column], position: &RowColumnPosition) -> Option<Rect> {
    let row = position.row as usize;
    let column = position.column as usize;
    let first = cell_rect(rows, columns, row, column)?;
    let last = cell_rect(
        rows,
        columns,
        row + position.row_span.max(1) as usize - 1,
        column + position.column_span.max(1) as usize - 1,
    )?;
    Some(first.union(&last))
}
