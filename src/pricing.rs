use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::entities::tariff;
use crate::error::{AppError, AppResult};
use crate::utils::geo::round2;

/// Look up the unique active tariff row for a (city, delivery type) pair.
///
/// Runs against the caller's connection, so inside a transaction the lookup
/// and the writes it prices share one point-in-time view. A missing row is a
/// reference-data problem and surfaces as a 422 validation error keyed
/// `pricing`, never a 500.
pub async fn resolve_tariff<C: ConnectionTrait>(
    conn: &C,
    city_id: i32,
    delivery_type_id: i32,
) -> AppResult<tariff::Model> {
    tariff::Entity::find()
        .filter(tariff::Column::CityId.eq(city_id))
        .filter(tariff::Column::DeliveryTypeId.eq(delivery_type_id))
        .filter(tariff::Column::IsActive.eq(true))
        .one(conn)
        .await?
        .ok_or_else(AppError::pricing_unavailable)
}

/// Price a request from the sender and recipient rate cards.
///
/// Each tariff component is averaged across the two cities, then
/// `amount = base + weight * price/kg + distance * price/km`,
/// rounded to 2 decimals.
pub fn calculate_amount(
    weight: f64,
    distance_km: f64,
    sender: &tariff::Model,
    recipient: &tariff::Model,
) -> f64 {
    let base_price = (sender.base_price + recipient.base_price) / 2.0;
    let price_per_kg = (sender.price_per_kg + recipient.price_per_kg) / 2.0;
    let price_per_km = (sender.price_per_km + recipient.price_per_km) / 2.0;

    round2(base_price + weight * price_per_kg + distance_km * price_per_km)
}

/// The stored amount is a snapshot taken at creation time. A partial update
/// recomputes it only when the delivery type or the weight changes; tariff
/// edits after creation never retroactively reprice a request.
pub fn should_reprice(delivery_type_id: Option<i32>, weight: Option<f64>) -> bool {
    delivery_type_id.is_some() || weight.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tariff(base_price: f64, price_per_km: f64, price_per_kg: f64) -> tariff::Model {
        tariff::Model {
            id: 0,
            city_id: 0,
            delivery_type_id: 0,
            base_price,
            price_per_km,
            price_per_kg,
            is_active: true,
        }
    }

    #[test]
    fn test_amount_averages_both_rate_cards() {
        let sender = tariff(15.0, 2.0, 3.0);
        let recipient = tariff(20.0, 2.5, 4.0);

        // base avg 17.5 + 5 kg * 3.5 + 100 km * 2.25 = 260.00
        let amount = calculate_amount(5.0, 100.0, &sender, &recipient);
        assert_eq!(amount, 260.0);
    }

    #[test]
    fn test_amount_zero_distance_charges_base_and_weight_only() {
        let sender = tariff(10.0, 1.5, 2.0);
        let recipient = tariff(10.0, 1.5, 2.0);

        let amount = calculate_amount(3.0, 0.0, &sender, &recipient);
        assert_eq!(amount, 16.0);
    }

    #[test]
    fn test_amount_is_rounded_to_cents() {
        let sender = tariff(10.0, 3.0, 1.0);
        let recipient = tariff(10.0, 3.0, 1.0);

        // 10 + 0.333 + 3 * 33.333 = 110.332
        let amount = calculate_amount(0.333, 33.333, &sender, &recipient);
        assert_eq!(amount, 110.33);
    }

    #[test]
    fn test_reprice_only_on_weight_or_delivery_type() {
        assert!(!should_reprice(None, None));
        assert!(should_reprice(Some(2), None));
        assert!(should_reprice(None, Some(7.5)));
        assert!(should_reprice(Some(1), Some(1.0)));
    }
}
