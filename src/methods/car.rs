use crate::model::{Car, UserRole};

/// Role-scoped car listing.
///
/// Admins manage the whole fleet, so they see every car regardless of
/// availability. Customers only see cars they could actually rent. Input
/// order is preserved either way.
pub fn visible_cars(cars: Vec<Car>, role: UserRole) -> Vec<Car> {
    match role {
        UserRole::Admin => cars,
        UserRole::Customer => cars.into_iter().filter(Car::is_rentable).collect(),
    }
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    fn car(id: i32, available: bool, stock: i32) -> Car {
        Car {
            id,
            brand: String::from("Fiat"),
            model: String::from("Cronos"),
            color: String::from("Gris"),
            year: String::from("2022"),
            price_per_day: 45.0,
            stock,
            available,
            image_url: None,
        }
    }

    fn ids(cars: &[Car]) -> Vec<i32> {
        cars.iter().map(|c| c.id).collect()
    }

    #[test]
    fn admin_sees_everything_in_order() {
        let fleet = vec![car(3, false, 0), car(1, true, 2), car(2, true, 0)];
        let visible = visible_cars(fleet, UserRole::Admin);
        assert_eq!(ids(&visible), vec![3, 1, 2]);
    }

    #[test]
    fn customer_only_sees_rentable_cars() {
        let fleet = vec![
            car(1, true, 2),  // rentable
            car(2, true, 0),  // out of stock
            car(3, false, 5), // flagged unavailable
            car(4, true, 1),  // rentable
        ];
        let visible = visible_cars(fleet, UserRole::Customer);
        assert_eq!(ids(&visible), vec![1, 4]);
    }

    #[test]
    fn empty_fleet_stays_empty() {
        assert!(visible_cars(vec![], UserRole::Customer).is_empty());
        assert!(visible_cars(vec![], UserRole::Admin).is_empty());
    }
}
