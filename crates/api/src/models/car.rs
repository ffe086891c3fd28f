//! Car catalog types: brands, models, variants.
//!
//! [`CarVariant`] is the wide specification record. Internally it is split
//! into one struct per specification group so each group can be read and
//! tested on its own, but every group is flattened on both sides: sqlx reads
//! the columns by name from one row, and serde writes one flat JSON object.
//! Every specification field is nullable and serializes as `null` when
//! absent, never as a zero or `false` default.

use serde::Serialize;

use comparebuddy_core::{CarBrandId, CarModelId, CarVariantId, Price};

/// A car manufacturer.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CarBrand {
    pub id: CarBrandId,
    pub name: String,
    /// Name in Thai script.
    pub name_th: Option<String>,
    pub country: Option<String>,
    pub logo_url: Option<String>,
}

/// Brand detail: the brand's own fields plus its models.
#[derive(Debug, Clone, Serialize)]
pub struct CarBrandWithModels {
    #[serde(flatten)]
    pub brand: CarBrand,
    pub models: Vec<CarModel>,
}

/// A model line of a brand.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CarModel {
    pub id: CarModelId,
    pub brand_id: CarBrandId,
    pub name: String,
    /// e.g. `BEV`, `PHEV`, `HEV`, `ICE`.
    pub powertrain_type: String,
    pub body_type: String,
    pub segment: String,
    pub year_launched: Option<i32>,
    pub status: String,
    /// Joined from `car_brands`; only present on listing and detail queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(default)]
    pub brand_name: Option<String>,
}

/// Model detail: the model's own fields plus its variant summaries.
#[derive(Debug, Clone, Serialize)]
pub struct CarModelWithVariants {
    #[serde(flatten)]
    pub model: CarModel,
    pub variants: Vec<CarVariantSummary>,
}

/// Narrow view of a variant used in model detail.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CarVariantSummary {
    pub id: CarVariantId,
    pub model_id: CarModelId,
    pub name: String,
    pub price_baht: Option<Price>,
    pub status: String,
}

/// Full specification of one variant.
#[derive(Debug, Clone, Default, Serialize, sqlx::FromRow)]
pub struct CarVariant {
    pub id: CarVariantId,
    pub model_id: CarModelId,
    pub name: String,
    pub price_baht: Option<Price>,
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub powertrain_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,

    #[serde(flatten)]
    #[sqlx(flatten)]
    pub electric: ElectricSpec,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub engine: EngineSpec,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub hybrid: HybridSpec,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub performance: PerformanceSpec,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub dimensions: DimensionSpec,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub chassis: ChassisSpec,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub safety: SafetySpec,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub adas: AdasSpec,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub ncap: NcapSpec,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub comfort: ComfortSpec,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub infotainment: InfotainmentSpec,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub exterior: ExteriorSpec,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub warranty: WarrantySpec,
}

/// Battery, motor and charging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, sqlx::FromRow)]
pub struct ElectricSpec {
    pub battery_capacity_kwh: Option<f64>,
    pub battery_type: Option<String>,
    pub motor_power_kw: Option<f64>,
    pub motor_torque_nm: Option<f64>,
    pub front_motor_kw: Option<f64>,
    pub rear_motor_kw: Option<f64>,
    pub range_km: Option<i32>,
    /// Test cycle the range was measured on (NEDC, WLTP, ...).
    pub range_standard: Option<String>,
    pub ac_charge_kw: Option<f64>,
    pub dc_charge_kw: Option<f64>,
    pub ac_charge_time_hrs: Option<f64>,
    pub dc_charge_time_mins: Option<i32>,
    pub charging_port: Option<String>,
    pub v2l: Option<bool>,
    pub v2g: Option<bool>,
    pub heat_pump: Option<bool>,
    pub battery_preconditioning: Option<bool>,
}

/// Combustion engine and transmission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, sqlx::FromRow)]
pub struct EngineSpec {
    pub displacement_cc: Option<i32>,
    pub engine_type: Option<String>,
    pub horsepower: Option<i32>,
    pub engine_torque_nm: Option<i32>,
    pub fuel_type: Option<String>,
    pub fuel_tank_liters: Option<f64>,
    /// Kilometres per litre.
    pub fuel_consumption_kml: Option<f64>,
    pub turbo: Option<bool>,
    pub transmission: Option<String>,
    pub transmission_speeds: Option<i32>,
}

/// Combined output of hybrid systems.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct HybridSpec {
    pub system_power_hp: Option<i32>,
    pub system_torque_nm: Option<i32>,
    pub ev_range_km: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, sqlx::FromRow)]
pub struct PerformanceSpec {
    pub top_speed_kmh: Option<i32>,
    /// Seconds from 0 to 100 km/h.
    pub acceleration_0_100: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct DimensionSpec {
    pub length_mm: Option<i32>,
    pub width_mm: Option<i32>,
    pub height_mm: Option<i32>,
    pub wheelbase_mm: Option<i32>,
    pub ground_clearance_mm: Option<i32>,
    pub curb_weight_kg: Option<i32>,
    pub gross_weight_kg: Option<i32>,
    pub trunk_capacity_liters: Option<i32>,
    pub trunk_max_liters: Option<i32>,
    pub frunk_capacity_liters: Option<i32>,
}

/// Drivetrain, suspension, brakes and tyres.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ChassisSpec {
    pub drive_type: Option<String>,
    pub front_suspension: Option<String>,
    pub rear_suspension: Option<String>,
    pub front_brakes: Option<String>,
    pub rear_brakes: Option<String>,
    pub tire_size_front: Option<String>,
    pub tire_size_rear: Option<String>,
    pub spare_tire: Option<String>,
}

/// Passive safety and parking aids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct SafetySpec {
    pub airbags: Option<i32>,
    pub abs: Option<bool>,
    pub esc: Option<bool>,
    pub traction_control: Option<bool>,
    pub hill_start_assist: Option<bool>,
    pub hill_descent_control: Option<bool>,
    pub tpms: Option<bool>,
    pub isofix: Option<bool>,
    pub parking_sensor_front: Option<bool>,
    pub parking_sensor_rear: Option<bool>,
    pub camera_rear: Option<bool>,
    pub camera_360: Option<bool>,
    pub auto_parking: Option<bool>,
}

/// Driver-assistance features.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct AdasSpec {
    pub aeb: Option<bool>,
    pub fcw: Option<bool>,
    pub lka: Option<bool>,
    pub ldw: Option<bool>,
    pub bsd: Option<bool>,
    pub rcta: Option<bool>,
    pub acc: Option<bool>,
    pub acc_stop_go: Option<bool>,
    pub driver_monitoring: Option<String>,
    pub traffic_sign_recognition: Option<bool>,
    pub night_vision: Option<bool>,
    pub adas_level: Option<String>,
}

/// Crash-test rating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, sqlx::FromRow)]
pub struct NcapSpec {
    pub ncap_rating: Option<f64>,
    /// Rating body (Euro NCAP, ASEAN NCAP, ...).
    pub ncap_body: Option<String>,
    pub ncap_year: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ComfortSpec {
    pub seats: Option<i32>,
    pub seat_material: Option<String>,
    pub driver_seat_electric: Option<bool>,
    pub passenger_seat_electric: Option<bool>,
    pub driver_seat_memory: Option<bool>,
    pub ventilated_seats_front: Option<bool>,
    pub ventilated_seats_rear: Option<bool>,
    pub heated_seats_front: Option<bool>,
    pub heated_seats_rear: Option<bool>,
    pub rear_seat_recline: Option<bool>,
    pub ac_zones: Option<i32>,
    pub rear_ac_vents: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, sqlx::FromRow)]
pub struct InfotainmentSpec {
    pub screen_size_inch: Option<f64>,
    pub screen_type: Option<String>,
    pub digital_cluster: Option<bool>,
    pub cluster_size_inch: Option<f64>,
    pub hud: Option<bool>,
    pub speaker_brand: Option<String>,
    pub speaker_count: Option<i32>,
    pub apple_carplay: Option<bool>,
    pub android_auto: Option<bool>,
    pub wireless_carplay: Option<bool>,
    pub wireless_android_auto: Option<bool>,
    pub wireless_phone_charging: Option<bool>,
    pub usb_c_ports: Option<i32>,
    pub usb_a_ports: Option<i32>,
    pub bluetooth: Option<String>,
    pub ota_update: Option<bool>,
}

/// Lighting, glass and body conveniences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ExteriorSpec {
    pub headlight_type: Option<String>,
    pub drl: Option<bool>,
    pub auto_headlights: Option<bool>,
    pub adaptive_headlights: Option<bool>,
    pub fog_lights: Option<bool>,
    pub sunroof: Option<String>,
    pub power_tailgate: Option<bool>,
    pub hands_free_tailgate: Option<bool>,
    pub keyless_entry: Option<bool>,
    pub push_start: Option<bool>,
    pub auto_folding_mirrors: Option<bool>,
    pub rain_sensing_wipers: Option<bool>,
    pub roof_rails: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct WarrantySpec {
    pub warranty_years: Option<i32>,
    pub warranty_km: Option<i32>,
    pub battery_warranty_years: Option<i32>,
    pub battery_warranty_km: Option<i32>,
}

/// Row of the price-range browse listing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct VariantBrowseResult {
    pub variant_id: CarVariantId,
    pub model_id: CarModelId,
    pub variant_name: String,
    pub price_baht: Option<Price>,
    pub status: String,
    pub brand_name: String,
    pub model_name: String,
    pub powertrain_type: String,
    pub range_km: Option<i32>,
    pub fuel_consumption_kml: Option<f64>,
}

/// Row of the free-text search listing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct VariantSearchResult {
    pub variant_id: CarVariantId,
    pub model_id: CarModelId,
    pub variant_name: String,
    pub price_baht: Option<Price>,
    pub status: String,
    pub brand_name: String,
    pub model_name: String,
    pub powertrain_type: String,
}
