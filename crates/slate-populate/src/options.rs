use bson::Document;
use slate_query::{Model, PopulateSpec, Projection, Sort};

use crate::config::PopulateConfig;
use crate::error::PopulateError;
use crate::group::Cardinality;
use crate::populate::reverse_populate;

/// Options that must be supplied, in the order they are checked.
pub const REQUIRED_OPTIONS: [&str; 5] = [
    "model_array",
    "store_where",
    "array_pop",
    "model",
    "id_field",
];

/// Validated options for one reverse-population call.
///
/// Every required option is present by construction; obtain one through
/// [`PopulateBuilder::build`].
pub struct PopulateOptions<'m, M: Model> {
    /// Parent documents to augment.
    pub model_array: Vec<Document>,
    /// Field the related documents are attached under.
    pub store_where: String,
    pub cardinality: Cardinality,
    /// Query interface of the related collection.
    pub model: &'m M,
    /// Join-key path on the related documents.
    pub id_field: String,
    pub filters: Option<Document>,
    pub sort: Vec<Sort>,
    pub populate: Option<PopulateSpec>,
    pub select: Option<Projection>,
}

/// Collects reverse-population options and checks the required ones.
pub struct PopulateBuilder<'m, M> {
    model_array: Option<Vec<Document>>,
    store_where: Option<String>,
    array_pop: Option<bool>,
    model: Option<&'m M>,
    id_field: Option<String>,
    filters: Option<Document>,
    sort: Vec<Sort>,
    populate: Option<PopulateSpec>,
    select: Option<Projection>,
}

impl<M> Default for PopulateBuilder<'_, M> {
    fn default() -> Self {
        Self {
            model_array: None,
            store_where: None,
            array_pop: None,
            model: None,
            id_field: None,
            filters: None,
            sort: Vec::new(),
            populate: None,
            select: None,
        }
    }
}

impl<'m, M: Model> PopulateBuilder<'m, M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a deserialized config; handles are still set in code.
    pub fn from_config(config: PopulateConfig) -> Self {
        Self::new().config(config)
    }

    /// Overlay every option present in `config`.
    pub fn config(mut self, config: PopulateConfig) -> Self {
        if let Some(store_where) = config.store_where {
            self.store_where = Some(store_where);
        }
        if let Some(array_pop) = config.array_pop {
            self.array_pop = Some(array_pop);
        }
        if let Some(id_field) = config.id_field {
            self.id_field = Some(id_field);
        }
        if let Some(filters) = config.filters {
            self.filters = Some(filters);
        }
        if let Some(sort) = config.sort {
            self.sort = slate_query::parse_sort(&sort);
        }
        if let Some(select) = config.select {
            self.select = Some(Projection::parse(&select));
        }
        if let Some(populate) = config.populate {
            self.populate = Some(populate);
        }
        self
    }

    pub fn model_array(mut self, parents: Vec<Document>) -> Self {
        self.model_array = Some(parents);
        self
    }

    pub fn store_where(mut self, field: impl Into<String>) -> Self {
        self.store_where = Some(field.into());
        self
    }

    /// `true` attaches an array of matches, `false` a single document.
    pub fn array_pop(mut self, array_pop: bool) -> Self {
        self.array_pop = Some(array_pop);
        self
    }

    pub fn model(mut self, model: &'m M) -> Self {
        self.model = Some(model);
        self
    }

    pub fn id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = Some(field.into());
        self
    }

    pub fn filters(mut self, filters: Document) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn sort(mut self, sort: impl IntoIterator<Item = Sort>) -> Self {
        self.sort = sort.into_iter().collect();
        self
    }

    pub fn populate(mut self, spec: impl Into<PopulateSpec>) -> Self {
        self.populate = Some(spec.into());
        self
    }

    pub fn select(mut self, select: impl Into<Projection>) -> Self {
        self.select = Some(select.into());
        self
    }

    /// Check required options in [`REQUIRED_OPTIONS`] order and fail on the
    /// first one absent. `array_pop(false)` counts as present.
    pub fn build(self) -> Result<PopulateOptions<'m, M>, PopulateError<M::Error>> {
        let model_array = self
            .model_array
            .ok_or(PopulateError::MissingField("model_array"))?;
        let store_where = self
            .store_where
            .ok_or(PopulateError::MissingField("store_where"))?;
        let array_pop = self
            .array_pop
            .ok_or(PopulateError::MissingField("array_pop"))?;
        let model = self.model.ok_or(PopulateError::MissingField("model"))?;
        let id_field = self
            .id_field
            .ok_or(PopulateError::MissingField("id_field"))?;

        Ok(PopulateOptions {
            model_array,
            store_where,
            cardinality: Cardinality::from_array_pop(array_pop),
            model,
            id_field,
            filters: self.filters,
            sort: self.sort,
            populate: self.populate,
            select: self.select,
        })
    }

    /// Validate, then run [`reverse_populate`].
    pub async fn run(self) -> Result<Vec<Document>, PopulateError<M::Error>> {
        reverse_populate(self.build()?).await
    }
}
