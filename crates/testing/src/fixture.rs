// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_marshal::{Database, Table, TableOptions};

use crate::{create_scalar_column, create_vector_column, ensure_table, init_tracing};

/// A small schema with references in every shape:
///
/// - `Country`: hash on `ShortText`, column `population: Int64`
/// - `Author`: patricia on `ShortText`, columns `age: UInt8`,
///   `country -> Country`, `nicknames: []ShortText`, `visited: []Country`
/// - `Tag`: double array, value `Int32` (a usage count)
/// - `Review`: key-less, columns `stars: Int8`, `body: Text`
/// - `Book`: hash on `UInt32`, value `Float` (a price), columns
///   `title: ShortText`, `year: Int16`, `author -> Author`, `tags: []Tag`,
///   `ratings: []Float`, `coauthors: []Author`, `reviews: []Review`,
///   `location: WGS84GeoPoint`
pub struct Library {
	pub db: Database,
	pub country: Table,
	pub author: Table,
	pub tag: Table,
	pub review: Table,
	pub book: Table,
}

pub fn library() -> Library {
	init_tracing();
	let db = Database::memory();

	let country = ensure_table(&db, TableOptions::hash("Country", "ShortText"));
	create_scalar_column(&country, "population", "Int64");

	let author = ensure_table(&db, TableOptions::patricia("Author", "ShortText"));
	create_scalar_column(&author, "age", "UInt8");
	create_scalar_column(&author, "country", "Country");
	create_vector_column(&author, "nicknames", "ShortText");
	create_vector_column(&author, "visited", "Country");

	let tag = ensure_table(&db, TableOptions::double_array("Tag").value_type("Int32"));

	let review = ensure_table(&db, TableOptions::array("Review"));
	create_scalar_column(&review, "stars", "Int8");
	create_scalar_column(&review, "body", "Text");

	let book = ensure_table(&db, TableOptions::hash("Book", "UInt32").value_type("Float"));
	create_scalar_column(&book, "title", "ShortText");
	create_scalar_column(&book, "year", "Int16");
	create_scalar_column(&book, "author", "Author");
	create_vector_column(&book, "tags", "Tag");
	create_vector_column(&book, "ratings", "Float");
	create_vector_column(&book, "coauthors", "Author");
	create_vector_column(&book, "reviews", "Review");
	create_scalar_column(&book, "location", "WGS84GeoPoint");

	Library {
		db,
		country,
		author,
		tag,
		review,
		book,
	}
}
