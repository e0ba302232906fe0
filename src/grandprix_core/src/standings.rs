use serde::{Deserialize, Serialize};

use crate::driver::Driver;

/// A driver's cumulative championship points.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub driver: Driver,
    pub points: u32,
}

/// Championship table, leader first.
///
/// Always built from scratch from the cumulative totals. Drivers level on
/// points are listed in roster order; only the tie-break race separates a
/// shared lead.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    pub entries: Vec<StandingsEntry>,
}

impl Standings {
    /// Build standings from drivers and their totals, given in roster order.
    pub fn from_totals(roster: &[Driver], totals: &[u32]) -> Self {
        debug_assert_eq!(roster.len(), totals.len());

        let mut entries: Vec<StandingsEntry> = roster
            .iter()
            .zip(totals)
            .map(|(driver, &points)| StandingsEntry {
                driver: driver.clone(),
                points,
            })
            .collect();
        entries.sort_by(|a, b| b.points.cmp(&a.points));

        Standings { entries }
    }

    pub fn leader(&self) -> Option<&StandingsEntry> {
        self.entries.first()
    }

    /// Highest points total, if anyone is in the table.
    pub fn top_points(&self) -> Option<u32> {
        self.leader().map(|e| e.points)
    }

    /// Every driver sharing the highest points total, in roster order.
    pub fn leaders(&self) -> Vec<&StandingsEntry> {
        match self.top_points() {
            Some(top) => self.entries.iter().take_while(|e| e.points == top).collect(),
            None => Vec::new(),
        }
    }

    pub fn is_tied_at_top(&self) -> bool {
        self.leaders().len() > 1
    }

    pub fn points_of(&self, driver_name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.driver.name == driver_name)
            .map(|e| e.points)
    }

    /// 1-indexed position of a driver in the table.
    pub fn position_of(&self, driver_name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.driver.name == driver_name)
            .map(|i| i + 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Driver> {
        vec![
            Driver::new("A", 5, 5),
            Driver::new("B", 5, 5),
            Driver::new("C", 5, 5),
        ]
    }

    #[test]
    fn test_sorted_by_points() {
        let standings = Standings::from_totals(&roster(), &[18, 43, 15]);
        let names: Vec<&str> = standings.entries.iter().map(|e| e.driver.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert_eq!(standings.top_points(), Some(43));
        assert!(!standings.is_tied_at_top());
        assert_eq!(standings.position_of("C"), Some(3));
    }

    #[test]
    fn test_shared_lead_in_roster_order() {
        let standings = Standings::from_totals(&roster(), &[15, 43, 43]);
        let leaders: Vec<&str> = standings.leaders().iter().map(|e| e.driver.name.as_str()).collect();
        assert_eq!(leaders, vec!["B", "C"]);
        assert!(standings.is_tied_at_top());
    }

    #[test]
    fn test_empty() {
        let standings = Standings::default();
        assert!(standings.leaders().is_empty());
        assert_eq!(standings.top_points(), None);
    }
}
