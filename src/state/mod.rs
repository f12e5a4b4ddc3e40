//! `use_reducer` states behind the data hooks. Every mutation is applied
//! only after the server confirmed it.

pub mod auth;
pub mod dashboard;
pub mod finance;
pub mod objectives;
pub mod payroll;
pub mod recurring;

/// Swaps the first element matching `pred` for `item`. Returns false when
/// nothing matched.
fn replace_first<T>(items: &mut [T], pred: impl Fn(&T) -> bool, item: T) -> bool {
    match items.iter_mut().find(|x| pred(x)) {
        Some(slot) => {
            *slot = item;
            true
        }
        None => false,
    }
}
