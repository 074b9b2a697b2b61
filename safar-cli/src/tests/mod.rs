//! Shared test harness modules for the Safar CLI.

use super::*;

mod helpers;
mod unit;
