// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use unicode_width::UnicodeWidthStr;

use crate::util::pad_to_width;

/// A table of rows `T` rendered with the given columns and style.
pub struct Table<'a, S: TableStyle, T, C: TableColumn<T>> {
    style: S,
    columns: &'a [C],
    data: &'a [T],
}

impl<'a, S: TableStyle, T, C: TableColumn<T>> Table<'a, S, T, C> {
    pub fn new(style: S, columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            style,
            columns,
            data,
        }
    }
}

impl<S: TableStyle, T, C: TableColumn<T>> fmt::Display for Table<'_, S, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.style.write(f, self.columns, self.data)
    }
}

pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;

    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    /// Styles a padded cell for terminal output.
    fn stylize(&self, _data: &T, cell: String) -> String {
        cell
    }

    /// Styles the padded column header for terminal output.
    fn stylize_header(&self, name: String) -> String {
        name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

pub trait TableStyle {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result;
}

/// Plain text rows, cells padded to the widest cell of their column.
#[derive(Debug, Clone)]
pub struct TableStyleBasic {
    separator: &'static str,
    header: bool,
}

impl TableStyleBasic {
    pub fn new() -> Self {
        Self {
            separator: " ",
            header: false,
        }
    }

    pub fn with_separator(mut self, separator: &'static str) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_header(mut self) -> Self {
        self.header = true;
        self
    }
}

impl TableStyle for TableStyleBasic {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result {
        let cells: Vec<Vec<Cow<'_, str>>> = data
            .iter()
            .map(|row| columns.iter().map(|col| col.format(row)).collect())
            .collect();

        let names: Vec<Cow<'_, str>> = columns.iter().map(|col| col.name()).collect();
        let widths: Vec<usize> = (0..columns.len())
            .map(|i| {
                let header = if self.header { names[i].width() } else { 0 };
                cells
                    .iter()
                    .map(|row| row[i].width())
                    .max()
                    .unwrap_or(0)
                    .max(header)
            })
            .collect();

        let pad = |i: usize, col: &C, text: &str| {
            let direction = col.padding_direction();
            if i == columns.len() - 1 && direction == PaddingDirection::Left {
                text.to_string() // Last column does not need padding if it's left-aligned
            } else {
                pad_to_width(text, widths[i], direction == PaddingDirection::Right)
            }
        };

        if self.header {
            for (i, col) in columns.iter().enumerate() {
                if i > 0 {
                    write!(f, "{}", self.separator)?;
                }
                write!(f, "{}", col.stylize_header(pad(i, col, &names[i])))?;
            }
            writeln!(f)?;
        }

        for (row, data) in cells.iter().zip(data) {
            for (i, (col, cell)) in columns.iter().zip(row).enumerate() {
                if i > 0 {
                    write!(f, "{}", self.separator)?;
                }
                write!(f, "{}", col.stylize(data, pad(i, col, cell)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A JSON array of objects keyed by column name.
#[derive(Debug, Clone)]
pub struct TableStyleJson;

impl TableStyleJson {
    pub fn new() -> Self {
        Self
    }
}

impl TableStyle for TableStyleJson {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result {
        let rows: Vec<serde_json::Map<String, serde_json::Value>> = data
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|col| {
                        let value = serde_json::Value::String(col.format(row).into_owned());
                        (col.name().into_owned(), value)
                    })
                    .collect()
            })
            .collect();

        let json = serde_json::to_string_pretty(&rows).map_err(|_| fmt::Error)?;
        write!(f, "{json}")
    }
}
