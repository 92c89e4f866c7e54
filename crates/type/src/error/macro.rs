// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

/// Wraps a diagnostic into an [`Error`](crate::Error).
#[macro_export]
macro_rules! error {
	($diagnostic:expr) => {
		$crate::Error($diagnostic)
	};
}

/// Returns early with an [`Error`](crate::Error) built from a diagnostic.
#[macro_export]
macro_rules! return_error {
	($diagnostic:expr) => {
		return Err($crate::Error($diagnostic))
	};
}

/// Evaluates to `Err(Error)` built from a diagnostic.
#[macro_export]
macro_rules! err {
	($diagnostic:expr) => {
		Err($crate::Error($diagnostic))
	};
}

/// Creates an internal error diagnostic capturing the source location.
#[macro_export]
macro_rules! internal_error {
	($reason:expr) => {
		$crate::error::diagnostic::internal::internal_with_context($reason, file!(), line!(), module_path!())
	};
	($fmt:expr, $($arg:tt)*) => {
		$crate::error::diagnostic::internal::internal_with_context(
			format!($fmt, $($arg)*),
			file!(),
			line!(),
			module_path!(),
		)
	};
}

/// Returns early with an internal error capturing the source location.
#[macro_export]
macro_rules! return_internal_error {
	($reason:expr) => {
		return Err($crate::Error($crate::internal_error!($reason)))
	};
	($fmt:expr, $($arg:tt)*) => {
		return Err($crate::Error($crate::internal_error!($fmt, $($arg)*)))
	};
}
