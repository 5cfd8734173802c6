//! Tests for the catalogue merge engine
