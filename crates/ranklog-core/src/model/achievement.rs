use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Achievement - one ranked entry of a list document
///
/// Only `id`, `name`, `player`, `rank` and `date` are read by the changelog
/// engine. Everything else is payload: the typed fields are the ones the
/// documents commonly carry, and any other key is kept verbatim in `extra`
/// so records round-trip without loss.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Achievement {
    /// Stable identifier. `None` when absent or not a string/number; such
    /// records never take part in identity-based diffing.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// Display title
    #[serde(default, deserialize_with = "string_or_default")]
    pub name: String,

    /// Player credited with the achievement
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub player: Option<String>,

    /// 1-based position. Integers and numeric strings are accepted.
    #[serde(
        default,
        deserialize_with = "lenient_rank",
        skip_serializing_if = "Option::is_none"
    )]
    pub rank: Option<i64>,

    /// Date the achievement happened, as written in the document
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,

    #[serde(rename = "levelID", default, skip_serializing_if = "Option::is_none")]
    pub level_id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Unrecognised keys, preserved as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Achievement {
    /// Create an achievement with an id, a name and a rank
    pub fn new(id: impl Into<String>, name: impl Into<String>, rank: i64) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            rank: Some(rank),
            ..Self::default()
        }
    }

    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set an arbitrary payload key
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// The id, if usable for identity matching
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Look up a payload key that has no typed field
    pub fn extra_field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_to_string))
}

fn string_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

fn lenient_rank<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(other) => scalar_to_string(&other).into_iter().collect(),
        None => Vec::new(),
    })
}
