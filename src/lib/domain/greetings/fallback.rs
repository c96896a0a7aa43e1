//! Stock wishes used when no fresh personalized wish is available

use rand::seq::SliceRandom;

/// Picks one stock wish addressed to `name`.
pub fn fallback_wish(name: &str) -> String {
    let pool = [
        format!("Happy Birthday, {name}! Wishing you a day filled with joy, and a year ahead as bright and impactful as you are."),
        format!("Wishing a fantastic birthday to {name}! We truly appreciate the wonderful spirit you bring to our team every day."),
        format!("Happy Birthday, {name}! May your special day be the start of a year full of happiness, success, and new adventures."),
        format!("Cheers to {name} on your birthday! We're so glad to have you with us. Have a wonderful celebration!"),
    ];

    pool.choose(&mut rand::thread_rng())
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_wishes_always_name_the_person() {
        for _ in 0..20 {
            assert!(fallback_wish("Ada Lovelace").contains("Ada Lovelace"));
        }
    }

    #[test]
    fn test_stock_wishes_come_from_the_pool() {
        let wish = fallback_wish("Ada");

        assert!(
            wish.starts_with("Happy Birthday, Ada!")
                || wish.starts_with("Wishing a fantastic birthday to Ada!")
                || wish.starts_with("Cheers to Ada on your birthday!")
        );
    }
}
