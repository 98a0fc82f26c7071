//! Label Derived - reactive label text.
//!
//! Recomputes the [`Label`] whenever the number or factor signals of a
//! scene change. A number of 0 means nothing has been calculated yet.

use spark_signals::{derived, Derived, Signal};

use crate::layout::Label;

/// Create the label derived.
pub fn create_label_derived(number: Signal<u64>, factors: Signal<Vec<u64>>) -> Derived<Label> {
    derived(move || {
        // Both reads register dependencies
        let n = number.get();
        let factors = factors.get();

        if n == 0 {
            Label::default()
        } else {
            Label::new(n, &factors)
        }
    })
}

// =============================================================================
// Tests
// =============================================================================
