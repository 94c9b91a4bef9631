use crate::types::location::Location;

/// The only non-empty city that may read statistics.
pub const AUTHORIZED_CITY: &str = "bangalore";

/// Holds the current location. An empty city means no gate is configured.
#[derive(Debug, Default)]
pub struct LocationGate {
    location: Location,
}

impl LocationGate {
    pub fn new() -> Self {
        LocationGate::default()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn set(&mut self, location: Location) {
        self.location = location;
    }

    pub fn reset(&mut self) {
        self.location = Location::default();
    }

    pub fn is_authorized(&self) -> bool {
        let city = self.location.city.as_str();
        city.is_empty() || city == AUTHORIZED_CITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(name: &str) -> Location {
        Location { city: name.to_string() }
    }

    #[test]
    fn unset_gate_authorizes() {
        assert!(LocationGate::new().is_authorized());
    }

    #[test]
    fn only_the_recognized_city_authorizes() {
        let mut gate = LocationGate::new();

        gate.set(city(AUTHORIZED_CITY));
        assert!(gate.is_authorized());

        gate.set(city("paris"));
        assert!(!gate.is_authorized());

        // Comparison is exact
        gate.set(city("Bangalore"));
        assert!(!gate.is_authorized());
    }

    #[test]
    fn reset_clears_the_gate() {
        let mut gate = LocationGate::new();
        gate.set(city("paris"));

        gate.reset();
        assert_eq!(gate.location(), &Location::default());
        assert!(gate.is_authorized());
    }
}
