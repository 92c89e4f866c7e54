// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_marshal::{Column, ColumnOptions, Database, Table, TableOptions};

/// Opens the table named in `options`, creating it first if it does not exist.
pub fn ensure_table(db: &Database, options: TableOptions) -> Table {
	if let Ok(table) = db.open_table(&options.name) {
		return table;
	}
	db.create_table(&options).unwrap()
}

pub fn create_scalar_column(table: &Table, name: &str, value_type: &str) -> Column {
	table.create_column(&ColumnOptions::scalar(name, value_type)).unwrap()
}

pub fn create_vector_column(table: &Table, name: &str, value_type: &str) -> Column {
	table.create_column(&ColumnOptions::vector(name, value_type)).unwrap()
}
