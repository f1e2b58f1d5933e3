use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::Settings;
use crate::core::EntityRecord;
use crate::error::{ExplorerError, Result};
use crate::providers::EntityResolver;

const RESOURCE_PREFIX: &str = "http://dbpedia.org/resource/";
const SEE_ALSO_URI: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";
const THUMBNAIL_URI: &str = "http://dbpedia.org/ontology/thumbnail";
const COMMENT_URI: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// DBpedia SPARQL endpoint resolver
pub struct DbpediaResolver {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    #[serde(default)]
    results: SparqlResults,
}

#[derive(Debug, Deserialize, Default)]
struct SparqlResults {
    #[serde(default)]
    bindings: Vec<Binding>,
}

#[derive(Debug, Deserialize)]
struct Binding {
    #[serde(default)]
    property: Option<BoundTerm>,
    #[serde(default)]
    value: Option<BoundTerm>,
}

#[derive(Debug, Deserialize)]
struct BoundTerm {
    #[serde(default)]
    value: String,
}

/// Properties the explorer keeps from the endpoint's answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PriorityProperty {
    SeeAlso,
    Thumbnail,
    Comment,
}

impl PriorityProperty {
    fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            SEE_ALSO_URI => Some(Self::SeeAlso),
            THUMBNAIL_URI => Some(Self::Thumbnail),
            COMMENT_URI => Some(Self::Comment),
            _ => None,
        }
    }
}

/// IRI of a DBpedia resource, rejecting names that would break out of `<...>`
pub fn resource_iri(identifier: &str) -> Result<String> {
    let name = identifier.trim().replace(' ', "_");
    if name.is_empty() {
        return Err(ExplorerError::invalid_input("entity identifier is missing"));
    }

    if let Some(bad) = name
        .chars()
        .find(|c| c.is_control() || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '\\' | '^' | '`'))
    {
        return Err(ExplorerError::invalid_input(format!(
            "entity identifier '{}' contains illegal character {:?}",
            identifier, bad
        )));
    }

    Ok(format!("{}{}", RESOURCE_PREFIX, name))
}

/// SPARQL query selecting seeAlso, thumbnail and English comment of an entity
pub fn entity_query(identifier: &str) -> Result<String> {
    let iri = resource_iri(identifier)?;
    Ok(format!(
        r#"PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX dbo: <http://dbpedia.org/ontology/>

SELECT ?property ?value
WHERE {{
    <{iri}> ?property ?value .
    FILTER(
        ?property = rdfs:seeAlso ||
        ?property = dbo:thumbnail ||
        (?property = rdfs:comment && LANG(?value) = 'en')
    )
}}"#
    ))
}

/// Build an entity from SPARQL JSON results, ignoring unrelated properties
pub fn record_from_results(identifier: &str, results: serde_json::Value) -> Result<EntityRecord> {
    let response: SparqlResponse = serde_json::from_value(results)?;

    let mut entity = EntityRecord::new(identifier);
    for binding in response.results.bindings {
        let (Some(property), Some(value)) = (binding.property, binding.value) else {
            continue;
        };

        match PriorityProperty::from_uri(&property.value) {
            Some(PriorityProperty::SeeAlso) => entity.data.see_also.push(value.value),
            Some(PriorityProperty::Thumbnail) => entity.data.thumbnail = Some(value.value),
            Some(PriorityProperty::Comment) => entity.data.comment = Some(value.value),
            None => {}
        }
    }

    Ok(entity)
}

impl DbpediaResolver {
    /// Create new resolver for a SPARQL endpoint
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.dbpedia_endpoint, settings.request_timeout())
    }

    /// Run a SPARQL query and return the raw JSON results
    pub async fn run_query(&self, query: &str) -> Result<serde_json::Value> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, SPARQL_RESULTS_JSON)
            .form(&[("query", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExplorerError::Endpoint {
                status: status.as_u16(),
                message: format!("Query failed with status code {}", status.as_u16()),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl EntityResolver for DbpediaResolver {
    async fn resolve(&self, identifier: &str) -> Result<EntityRecord> {
        let query = entity_query(identifier)?;
        tracing::debug!("Resolving '{}' via {}", identifier, self.endpoint);

        let results = self.run_query(&query).await?;
        record_from_results(identifier, results)
    }

    fn name(&self) -> &str {
        "dbpedia"
    }

    async fn is_available(&self) -> bool {
        self.run_query("ASK { ?s ?p ?o }").await.is_ok()
    }
}
