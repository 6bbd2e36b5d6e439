//! Analytic surrogates shared by the integration tests.

pub mod surrogates;
