//! Plain-text rendering of the rental receipt.
//!
//! The figures printed here must match what the dashboard showed when the
//! booking was made: the day count uses the same noon-pinned rounding and
//! the total is the snapshot stored at creation, never recomputed.

use currency_rs::Currency;

use crate::helper_model::RentalDetail;
use crate::methods::dates;
use crate::model::Gender;

const TERMS: &str = "Este comprobante certifica la reserva del vehiculo indicado por el periodo \
seleccionado. Presentarlo junto a su DNI al momento de retirar el vehiculo. La reserva puede \
estar sujeta a verificacion de disponibilidad y condiciones de la empresa.";

pub fn render_receipt(detail: &RentalDetail) -> String {
    let rental = &detail.rental;
    let car = &detail.car;
    let person = &detail.person;

    let start = rental.start_date.format("%Y-%m-%d").to_string();
    let end = rental
        .end_date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| String::from("-"));
    let days = rental
        .end_date
        .map(|date| dates::day_count(rental.start_date, date))
        .unwrap_or(0);
    let issued = rental.created_at.format("%Y-%m-%d").to_string();

    let mut doc = String::new();
    doc.push_str("ALQUILERES PELADO\n");
    doc.push_str("Comprobante de reserva\n");
    doc.push_str(&format!("Nro: {}    Fecha emision: {}\n", rental.confirmation, issued));
    doc.push_str(&"-".repeat(46));
    doc.push('\n');

    doc.push_str("Datos del cliente\n");
    doc.push_str(&format!("  Nombre: {}\n", person.name));
    doc.push_str(&format!("  DNI: {}\n", person.dni));
    doc.push_str(&format!("  Telefono: {}\n", person.phone));
    doc.push_str(&format!("  Genero: {}\n", gender_label(person.gender)));
    doc.push('\n');

    doc.push_str("Datos del auto\n");
    doc.push_str(&format!("  Vehiculo: {} {}\n", car.brand, car.model));
    doc.push_str(&format!("  Color: {}\n", car.color));
    doc.push_str(&format!("  Anio: {}\n", car.year));
    doc.push('\n');

    doc.push_str("Detalle del alquiler\n");
    doc.push_str(&format!("  Desde: {}\n", start));
    doc.push_str(&format!("  Hasta: {}\n", end));
    doc.push_str(&format!("  Dias: {}\n", days));
    doc.push_str(&format!("  Tarifa diaria: {}\n", money(rental.daily_rate)));
    doc.push('\n');

    doc.push_str(&format!("TOTAL  {}\n", money(rental.total)));
    doc.push('\n');
    doc.push_str(TERMS);
    doc.push('\n');
    doc
}

fn money(amount: f64) -> String {
    Currency::new_float(amount, None).format()
}

fn gender_label(gender: Option<Gender>) -> &'static str {
    match gender {
        Some(Gender::Male) => "Masculino",
        Some(Gender::Female) => "Femenino",
        Some(Gender::Other) => "Otro",
        Some(Gender::PNTS) | None => "-",
    }
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Car, Person, Rental};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn detail() -> RentalDetail {
        RentalDetail {
            rental: Rental {
                id: 7,
                confirmation: String::from("K4M2Q8ZX"),
                car_id: 1,
                user_id: 2,
                start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 6, 4),
                daily_rate: 50.0,
                total: 150.0,
                observation: None,
                is_active: true,
                created_at: Utc.with_ymd_and_hms(2024, 6, 1, 14, 30, 0).unwrap(),
            },
            car: Car {
                id: 1,
                brand: String::from("Toyota"),
                model: String::from("Etios"),
                color: String::from("Blanco"),
                year: String::from("2021"),
                price_per_day: 50.0,
                stock: 3,
                available: true,
                image_url: None,
            },
            person: Person {
                id: 9,
                name: String::from("Carla Gomez"),
                dni: String::from("30111222"),
                phone: String::from("1155667788"),
                mail: String::from("carla@example.com"),
                gender: Some(Gender::Female),
                birthday: NaiveDate::from_ymd_opt(1990, 3, 14),
            },
        }
    }

    // The booked figures and the receipt figures have to agree.
    #[test]
    fn receipt_matches_booking_figures() {
        let doc = render_receipt(&detail());
        assert!(doc.contains("Dias: 3"));
        assert!(doc.contains("Tarifa diaria: $50.00"));
        assert!(doc.contains("TOTAL  $150.00"));
        assert!(doc.contains("Desde: 2024-06-01"));
        assert!(doc.contains("Hasta: 2024-06-04"));
    }

    #[test]
    fn receipt_carries_customer_and_car_data() {
        let doc = render_receipt(&detail());
        assert!(doc.contains("Nro: K4M2Q8ZX"));
        assert!(doc.contains("Nombre: Carla Gomez"));
        assert!(doc.contains("DNI: 30111222"));
        assert!(doc.contains("Vehiculo: Toyota Etios"));
        assert!(doc.contains("Genero: Femenino"));
    }

    #[test]
    fn missing_end_date_renders_zero_days() {
        let mut d = detail();
        d.rental.end_date = None;
        let doc = render_receipt(&d);
        assert!(doc.contains("Hasta: -"));
        assert!(doc.contains("Dias: 0"));
    }
}
