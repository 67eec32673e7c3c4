//! # Situation Code Calculator
//!
//! Compact strength-state code from skater counts and empty-net flags.
//!
//! | home empty | away empty | code                |
//! |------------|------------|---------------------|
//! | no         | no         | `{home}v{away}`     |
//! | yes        | any        | `EN{home+1}v{away}` |
//! | no         | yes        | `{home}v{away+1}EN` |
//!
//! Home empty-net takes precedence when both nets are empty.

/// Strength code for the given counts. Counts exclude the extra attacker.
///
/// # Examples
/// ```
/// use ice_core::analysis::situation::calculate_situation_code;
///
/// assert_eq!(calculate_situation_code(5, 5, false, false), "5v5");
/// assert_eq!(calculate_situation_code(5, 5, true, false), "EN6v5");
/// assert_eq!(calculate_situation_code(5, 5, false, true), "5v6EN");
/// ```
pub fn calculate_situation_code(
    home_skaters: u32,
    away_skaters: u32,
    home_empty_net: bool,
    away_empty_net: bool,
) -> String {
    if home_empty_net {
        format!("EN{}v{}", home_skaters + 1, away_skaters)
    } else if away_empty_net {
        format!("{}v{}EN", home_skaters, away_skaters + 1)
    } else {
        format!("{}v{}", home_skaters, away_skaters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_and_special_teams() {
        assert_eq!(calculate_situation_code(5, 5, false, false), "5v5");
        assert_eq!(calculate_situation_code(5, 4, false, false), "5v4");
        assert_eq!(calculate_situation_code(3, 3, false, false), "3v3");
        assert_eq!(calculate_situation_code(4, 5, false, false), "4v5");
    }

    #[test]
    fn test_empty_net() {
        assert_eq!(calculate_situation_code(5, 5, true, false), "EN6v5");
        assert_eq!(calculate_situation_code(5, 5, false, true), "5v6EN");
        assert_eq!(calculate_situation_code(4, 5, true, false), "EN5v5");
    }

    #[test]
    fn test_home_empty_net_takes_precedence() {
        assert_eq!(calculate_situation_code(5, 5, true, true), "EN6v5");
    }

    #[test]
    fn test_stable() {
        let first = calculate_situation_code(5, 3, false, true);
        for _ in 0..10 {
            assert_eq!(calculate_situation_code(5, 3, false, true), first);
        }
    }
}
