// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! CLI command implementations.

/// `htex gen` — static-site export.
pub mod gen;
/// `htex serve` — HTTP content server.
pub mod serve;
