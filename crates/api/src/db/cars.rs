//! Car catalog repository.
//!
//! The single-variant lookup and the comparison query share one projection,
//! [`VARIANT_COLUMNS`], so a variant reads identically through both.

use sqlx::PgPool;

use comparebuddy_core::{CarBrandId, CarModelId, CarVariantId, Price};

use super::{FilterQuery, RepositoryError};
use crate::models::{
    CarBrand, CarModel, CarVariant, CarVariantSummary, VariantBrowseResult, VariantSearchResult,
};

/// Row cap for the browse listing.
pub const BROWSE_LIMIT: u32 = 50;

/// Row cap for free-text search.
pub const SEARCH_LIMIT: u32 = 20;

/// Full variant projection over `car_variants v`, `car_models m` and
/// `car_brands b`. Column names (or aliases) match the JSON keys of
/// [`CarVariant`].
pub const VARIANT_COLUMNS: &str = "\
    v.id, v.model_id, v.name, v.price_baht, v.status, \
    b.name AS brand_name, m.name AS model_name, m.powertrain_type, m.body_type, \
    v.battery_capacity_kwh, v.battery_type, v.motor_power_kw, v.motor_torque_nm, \
    v.front_motor_kw, v.rear_motor_kw, v.range_km, v.range_standard, \
    v.ac_charge_kw, v.dc_charge_kw, v.ac_charge_time_hrs, v.dc_charge_time_mins, \
    v.charging_port, v.v2l, v.v2g, v.heat_pump, v.battery_preconditioning, \
    v.displacement_cc, v.engine_type, v.horsepower, v.engine_torque_nm, \
    v.fuel_type, v.fuel_tank_liters, v.fuel_consumption_kml, v.turbo, \
    v.transmission, v.transmission_speeds, \
    v.system_power_hp, v.system_torque_nm, v.ev_range_km, \
    v.top_speed_kmh, v.acceleration_0_100, \
    v.length_mm, v.width_mm, v.height_mm, v.wheelbase_mm, v.ground_clearance_mm, \
    v.curb_weight_kg, v.gross_weight_kg, v.trunk_capacity_liters, v.trunk_max_liters, \
    v.frunk_capacity_liters, \
    v.drive_type, v.front_suspension, v.rear_suspension, v.front_brakes, v.rear_brakes, \
    v.tire_size_front, v.tire_size_rear, v.spare_tire, \
    v.airbags, v.abs, v.esc, v.traction_control, v.hill_start_assist, \
    v.hill_descent_control, v.tpms, v.isofix, v.parking_sensor_front, \
    v.parking_sensor_rear, v.camera_rear, v.camera_360, v.auto_parking, \
    v.aeb, v.fcw, v.lka, v.ldw, v.bsd, v.rcta, v.acc, v.acc_stop_go, \
    v.driver_monitoring, v.traffic_sign_recognition, v.night_vision, v.adas_level, \
    v.ncap_rating, v.ncap_body, v.ncap_year, \
    v.seats, v.seat_material, v.driver_seat_electric, v.passenger_seat_electric, \
    v.driver_seat_memory, v.ventilated_seats_front, v.ventilated_seats_rear, \
    v.heated_seats_front, v.heated_seats_rear, v.rear_seat_recline, v.ac_zones, \
    v.rear_ac_vents, \
    v.screen_size_inch, v.screen_type, v.digital_cluster, v.cluster_size_inch, v.hud, \
    v.speaker_brand, v.speaker_count, v.apple_carplay, v.android_auto, \
    v.wireless_carplay, v.wireless_android_auto, v.wireless_phone_charging, \
    v.usb_c_ports, v.usb_a_ports, v.bluetooth, v.ota_update, \
    v.headlight_type, v.drl, v.auto_headlights, v.adaptive_headlights, v.fog_lights, \
    v.sunroof, v.power_tailgate, v.hands_free_tailgate, v.keyless_entry, v.push_start, \
    v.auto_folding_mirrors, v.rain_sensing_wipers, v.roof_rails, \
    v.warranty_years, v.warranty_km, v.battery_warranty_years, v.battery_warranty_km";

const VARIANT_FROM: &str = "FROM car_variants v \
                            JOIN car_models m ON v.model_id = m.id \
                            JOIN car_brands b ON m.brand_id = b.id";

const MODEL_COLUMNS: &str = "m.id, m.brand_id, m.name, m.powertrain_type, m.body_type, \
                             m.segment, m.year_launched, m.status, b.name AS brand_name";

const BROWSE_COLUMNS: &str = "v.id AS variant_id, v.model_id, v.name AS variant_name, \
                              v.price_baht, v.status, b.name AS brand_name, \
                              m.name AS model_name, m.powertrain_type";

/// Optional filters for the model listing.
#[derive(Debug, Clone, Default)]
pub struct ModelFilter {
    pub brand_id: Option<CarBrandId>,
    pub powertrain_type: Option<String>,
    pub body_type: Option<String>,
    pub segment: Option<String>,
}

/// Optional filters for the variant browse listing. All bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct BrowseFilter {
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
    pub powertrain_type: Option<String>,
    pub min_range: Option<i32>,
    /// Minimum km per litre.
    pub min_fuel_efficiency: Option<f64>,
}

/// Repository for brands, models and variants.
pub struct CarRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CarRepository<'a> {
    /// Create a new car repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all brands ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn list_brands(&self) -> Result<Vec<CarBrand>, RepositoryError> {
        let rows = sqlx::query_as::<_, CarBrand>(
            r"
            SELECT id, name, name_th, country, logo_url
            FROM car_brands
            ORDER BY name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get a brand by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn get_brand(&self, id: CarBrandId) -> Result<Option<CarBrand>, RepositoryError> {
        let row = sqlx::query_as::<_, CarBrand>(
            r"
            SELECT id, name, name_th, country, logo_url
            FROM car_brands
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Models of one brand ordered by name, without the joined brand name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn models_for_brand(
        &self,
        brand_id: CarBrandId,
    ) -> Result<Vec<CarModel>, RepositoryError> {
        let rows = sqlx::query_as::<_, CarModel>(
            r"
            SELECT id, brand_id, name, powertrain_type, body_type, segment,
                   year_launched, status
            FROM car_models
            WHERE brand_id = $1
            ORDER BY name
            ",
        )
        .bind(brand_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// List models matching `filter` with their brand name, ordered by brand
    /// name then model name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn list_models(&self, filter: &ModelFilter) -> Result<Vec<CarModel>, RepositoryError> {
        Ok(models_query(filter).fetch_all(self.pool).await?)
    }

    /// Get a model by id with its brand name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn get_model(&self, id: CarModelId) -> Result<Option<CarModel>, RepositoryError> {
        let sql = format!(
            "SELECT {MODEL_COLUMNS} FROM car_models m \
             JOIN car_brands b ON m.brand_id = b.id WHERE m.id = $1"
        );
        let row = sqlx::query_as::<_, CarModel>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row)
    }

    /// Variant summaries of one model, ordered by price.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn variants_for_model(
        &self,
        model_id: CarModelId,
    ) -> Result<Vec<CarVariantSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, CarVariantSummary>(
            r"
            SELECT id, model_id, name, price_baht, status
            FROM car_variants
            WHERE model_id = $1
            ORDER BY price_baht
            ",
        )
        .bind(model_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Full specification of one variant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn get_variant(
        &self,
        id: CarVariantId,
    ) -> Result<Option<CarVariant>, RepositoryError> {
        let sql = format!("SELECT {VARIANT_COLUMNS} {VARIANT_FROM} WHERE v.id = $1");
        let row = sqlx::query_as::<_, CarVariant>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row)
    }

    /// Full specifications of the given variants.
    ///
    /// Unknown ids are absent from the result, and so are rows that fail to
    /// decode; neither fails the whole comparison.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn compare_variants(
        &self,
        ids: &[CarVariantId],
    ) -> Result<Vec<CarVariant>, RepositoryError> {
        Ok(compare_query(ids).fetch_lenient(self.pool).await?)
    }

    /// Priced variants matching `filter`, cheapest first, capped at
    /// [`BROWSE_LIMIT`] rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn browse_variants(
        &self,
        filter: &BrowseFilter,
    ) -> Result<Vec<VariantBrowseResult>, RepositoryError> {
        Ok(browse_query(filter).fetch_all(self.pool).await?)
    }

    /// Variants whose brand, model or variant name contains `term`
    /// (case-insensitive), capped at [`SEARCH_LIMIT`] rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn search_variants(
        &self,
        term: &str,
    ) -> Result<Vec<VariantSearchResult>, RepositoryError> {
        Ok(search_query(term).fetch_all(self.pool).await?)
    }
}

fn models_query(filter: &ModelFilter) -> FilterQuery<'_> {
    let mut query = FilterQuery::new(&format!(
        "SELECT {MODEL_COLUMNS} FROM car_models m \
         JOIN car_brands b ON m.brand_id = b.id WHERE 1=1"
    ));
    query
        .eq("m.brand_id", filter.brand_id)
        .eq("m.powertrain_type", filter.powertrain_type.as_deref())
        .eq("m.body_type", filter.body_type.as_deref())
        .eq("m.segment", filter.segment.as_deref())
        .order_by("b.name, m.name");
    query
}

fn compare_query(ids: &[CarVariantId]) -> FilterQuery<'static> {
    let mut query = FilterQuery::new(&format!("SELECT {VARIANT_COLUMNS} {VARIANT_FROM} WHERE 1=1"));
    query.in_list("v.id", ids.to_vec());
    query
}

fn browse_query(filter: &BrowseFilter) -> FilterQuery<'_> {
    let mut query = FilterQuery::new(&format!(
        "SELECT {BROWSE_COLUMNS}, v.range_km, v.fuel_consumption_kml {VARIANT_FROM} \
         WHERE v.price_baht IS NOT NULL"
    ));
    query
        .gte("v.price_baht", filter.min_price)
        .lte("v.price_baht", filter.max_price)
        .eq("m.powertrain_type", filter.powertrain_type.as_deref())
        .gte("v.range_km", filter.min_range)
        .gte("v.fuel_consumption_kml", filter.min_fuel_efficiency)
        .order_by("v.price_baht")
        .limit(BROWSE_LIMIT);
    query
}

fn search_query(term: &str) -> FilterQuery<'static> {
    let mut query =
        FilterQuery::new(&format!("SELECT {BROWSE_COLUMNS} {VARIANT_FROM} WHERE 1=1"));
    query
        .any_contains(&["b.name", "m.name", "v.name"], term)
        .order_by("b.name, m.name, v.price_baht")
        .limit(SEARCH_LIMIT);
    query
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    /// Output names of a projection list: the alias when present, otherwise
    /// the column name without its table prefix.
    fn projected_names(columns: &str) -> Vec<String> {
        columns
            .split(',')
            .map(|column| {
                let column = column.trim();
                let name = column
                    .rsplit_once(" AS ")
                    .map_or(column, |(_, alias)| alias);
                name.rsplit_once('.').map_or(name, |(_, bare)| bare).to_string()
            })
            .collect()
    }

    #[test]
    fn test_variant_columns_match_json_fields() {
        let variant = CarVariant {
            brand_name: Some(String::new()),
            model_name: Some(String::new()),
            powertrain_type: Some(String::new()),
            body_type: Some(String::new()),
            ..CarVariant::default()
        };
        let json = serde_json::to_value(&variant).unwrap();
        let fields: BTreeSet<String> = json.as_object().unwrap().keys().cloned().collect();

        let columns = projected_names(VARIANT_COLUMNS);
        let unique: BTreeSet<String> = columns.iter().cloned().collect();

        assert_eq!(columns.len(), unique.len(), "duplicate column in projection");
        assert_eq!(unique, fields);
    }

    #[test]
    fn test_compare_query_binds_each_id() {
        let ids = [CarVariantId::new(1), CarVariantId::new(3), CarVariantId::new(6)];
        let query = compare_query(&ids);
        assert!(query.sql().ends_with("WHERE 1=1 AND v.id IN ($1, $2, $3)"));
        assert!(query.sql().starts_with(&format!("SELECT {VARIANT_COLUMNS} FROM car_variants v")));
    }

    #[test]
    fn test_browse_query_without_filters() {
        let filter = BrowseFilter::default();
        let query = browse_query(&filter);
        assert!(
            query
                .sql()
                .ends_with("WHERE v.price_baht IS NOT NULL ORDER BY v.price_baht LIMIT 50")
        );
    }

    #[test]
    fn test_browse_query_filter_order() {
        let filter = BrowseFilter {
            min_price: Some("500000".parse().unwrap()),
            max_price: Some("1500000".parse().unwrap()),
            powertrain_type: Some("BEV".to_string()),
            min_range: Some(400),
            min_fuel_efficiency: Some(15.0),
        };
        let query = browse_query(&filter);
        assert!(query.sql().ends_with(
            "WHERE v.price_baht IS NOT NULL AND v.price_baht >= $1 AND v.price_baht <= $2 \
             AND m.powertrain_type = $3 AND v.range_km >= $4 AND v.fuel_consumption_kml >= $5 \
             ORDER BY v.price_baht LIMIT 50"
        ));
    }

    #[test]
    fn test_browse_results_carry_range_and_fuel() {
        let filter = BrowseFilter::default();
        let query = browse_query(&filter);
        let names = projected_names(query.sql().split(" FROM ").next().unwrap().trim_start_matches("SELECT "));
        assert!(names.contains(&"range_km".to_string()));
        assert!(names.contains(&"fuel_consumption_kml".to_string()));
        assert!(names.contains(&"variant_id".to_string()));
    }

    #[test]
    fn test_search_query_shape() {
        let query = search_query("atto");
        assert!(query.sql().ends_with(
            "WHERE 1=1 AND (b.name ILIKE $1 OR m.name ILIKE $2 OR v.name ILIKE $3) \
             ORDER BY b.name, m.name, v.price_baht LIMIT 20"
        ));
        assert!(!query.sql().contains("range_km"));
    }

    #[test]
    fn test_models_query_filters() {
        let filter = ModelFilter {
            brand_id: Some(CarBrandId::new(1)),
            segment: Some("B".to_string()),
            ..ModelFilter::default()
        };
        let query = models_query(&filter);
        assert!(query.sql().ends_with(
            "WHERE 1=1 AND m.brand_id = $1 AND m.segment = $2 ORDER BY b.name, m.name"
        ));
    }
}
