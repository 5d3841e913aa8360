//! Cliente para las tablas remotas `quadriciclos` / `revisoes`
//!
//! Se accede directamente a las tablas por el gateway REST del almacén
//! (estilo PostgREST), sin API intermedia. Los nombres de columna están en
//! portugués y se traducen aquí al modelo del dominio.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::clients::{ensure_success, BackendError, QuadricycleBackend};
use crate::models::{Quadricycle, QuadricycleStatus, Review, ReviewUpdate};

const VEHICLES_TABLE: &str = "quadriciclos";
const REVIEWS_TABLE: &str = "revisoes";

#[derive(Debug, Serialize, Deserialize)]
struct QuadricicloRow {
    id: String,
    modelo: String,
    data_compra: NaiveDate,
    nome_cliente: String,
    whatsapp: String,
    status: QuadricycleStatus,
    #[serde(default, skip_serializing)]
    revisoes: Vec<RevisaoRow>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RevisaoRow {
    quadriciclo_id: String,
    numero: u32,
    rotulo: String,
    data_prevista: NaiveDate,
    #[serde(default, deserialize_with = "null_as_false")]
    concluida: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    recusada: bool,
    dias_apos_anterior: i64,
    observacao: Option<String>,
    motivo_recusa: Option<String>,
    responsavel: Option<String>,
    km: Option<String>,
}

/// Columnas booleanas que pueden venir ausentes o en `null`
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl RevisaoRow {
    fn from_review(quad_id: &str, review: &Review) -> Self {
        Self {
            quadriciclo_id: quad_id.to_string(),
            numero: review.id,
            rotulo: review.label.clone(),
            data_prevista: review.scheduled_date,
            concluida: review.is_completed,
            recusada: review.is_refused,
            dias_apos_anterior: review.days_from_previous,
            observacao: review.observation.clone(),
            motivo_recusa: review.refusal_reason.clone(),
            responsavel: review.responsible.clone(),
            km: review.km.clone(),
        }
    }
}

impl From<RevisaoRow> for Review {
    fn from(row: RevisaoRow) -> Self {
        Self {
            id: row.numero,
            label: row.rotulo,
            scheduled_date: row.data_prevista,
            is_completed: row.concluida,
            is_refused: row.recusada,
            days_from_previous: row.dias_apos_anterior,
            observation: row.observacao,
            refusal_reason: row.motivo_recusa,
            responsible: row.responsavel,
            km: row.km,
        }
    }
}

impl From<QuadricicloRow> for Quadricycle {
    fn from(row: QuadricicloRow) -> Self {
        let mut reviews: Vec<Review> = row.revisoes.into_iter().map(Review::from).collect();
        reviews.sort_by_key(|r| r.id);
        Self {
            id: row.id,
            model: row.modelo,
            purchase_date: row.data_compra,
            client_name: row.nome_cliente,
            whatsapp: row.whatsapp,
            status: row.status,
            reviews,
        }
    }
}

impl From<&Quadricycle> for QuadricicloRow {
    fn from(quad: &Quadricycle) -> Self {
        Self {
            id: quad.id.clone(),
            modelo: quad.model.clone(),
            data_compra: quad.purchase_date,
            nome_cliente: quad.client_name.clone(),
            whatsapp: quad.whatsapp.clone(),
            status: quad.status,
            revisoes: Vec::new(),
        }
    }
}

/// Traducir una actualización parcial a columnas de `revisoes`.
/// Los campos ausentes no se envían; los `null` explícitos sí.
fn review_patch(update: &ReviewUpdate) -> Map<String, Value> {
    let mut patch = Map::new();
    if let Some(value) = update.is_completed {
        patch.insert("concluida".into(), Value::Bool(value));
    }
    if let Some(value) = update.is_refused {
        patch.insert("recusada".into(), Value::Bool(value));
    }
    let texts = [
        ("observacao", &update.observation),
        ("motivo_recusa", &update.refusal_reason),
        ("responsavel", &update.responsible),
        ("km", &update.km),
    ];
    for (column, field) in texts {
        if let Some(value) = field {
            patch.insert(column.into(), value.clone().map(Value::String).unwrap_or(Value::Null));
        }
    }
    patch
}

pub struct RemoteBackend {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RemoteBackend {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "return=minimal")
    }

    fn eq(value: &str) -> String {
        format!("eq.{}", value)
    }
}

#[async_trait]
impl QuadricycleBackend for RemoteBackend {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn is_available(&self) -> bool {
        let request = self
            .client
            .get(self.table_url(VEHICLES_TABLE))
            .query(&[("select", "id"), ("limit", "1")]);
        match self.authorized(request).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                log::debug!("🔌 Almacén remoto no disponible: {}", e);
                false
            }
        }
    }

    async fn list_all(&self) -> Result<Vec<Quadricycle>, BackendError> {
        let request = self
            .client
            .get(self.table_url(VEHICLES_TABLE))
            .query(&[
                ("select", format!("*,{}(*)", REVIEWS_TABLE).as_str()),
                ("order", "data_compra.desc"),
            ]);
        let response = ensure_success(self.authorized(request).send().await?).await?;
        let rows: Vec<QuadricicloRow> = response.json().await?;
        Ok(rows.into_iter().map(Quadricycle::from).collect())
    }

    /// Dos inserciones seguidas, sin transacción: si la segunda falla queda
    /// el vehículo sin revisiones en el almacén remoto.
    async fn create(&self, quad: &Quadricycle) -> Result<(), BackendError> {
        let request = self
            .client
            .post(self.table_url(VEHICLES_TABLE))
            .json(&QuadricicloRow::from(quad));
        ensure_success(self.authorized(request).send().await?).await?;

        let reviews: Vec<RevisaoRow> = quad
            .reviews
            .iter()
            .map(|r| RevisaoRow::from_review(&quad.id, r))
            .collect();
        let request = self.client.post(self.table_url(REVIEWS_TABLE)).json(&reviews);
        ensure_success(self.authorized(request).send().await?).await?;
        Ok(())
    }

    async fn set_status(&self, id: &str, status: QuadricycleStatus) -> Result<(), BackendError> {
        let request = self
            .client
            .patch(self.table_url(VEHICLES_TABLE))
            .query(&[("id", Self::eq(id))])
            .json(&serde_json::json!({ "status": status }));
        ensure_success(self.authorized(request).send().await?).await?;
        Ok(())
    }

    /// Las revisiones se borran por la cascada de la clave foránea
    async fn delete(&self, id: &str) -> Result<(), BackendError> {
        let request = self
            .client
            .delete(self.table_url(VEHICLES_TABLE))
            .query(&[("id", Self::eq(id))]);
        ensure_success(self.authorized(request).send().await?).await?;
        Ok(())
    }

    async fn update_review(
        &self,
        quad_id: &str,
        review_number: u32,
        update: &ReviewUpdate,
    ) -> Result<(), BackendError> {
        let patch = review_patch(&update.clone().normalized());
        if patch.is_empty() {
            return Ok(());
        }
        let request = self
            .client
            .patch(self.table_url(REVIEWS_TABLE))
            .query(&[
                ("quadriciclo_id", Self::eq(quad_id)),
                ("numero", Self::eq(&review_number.to_string())),
            ])
            .json(&patch);
        ensure_success(self.authorized(request).send().await?).await?;
        Ok(())
    }
}
