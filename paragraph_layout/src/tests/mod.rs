// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_builder;
mod test_queries;
mod test_strut;
mod utils;
