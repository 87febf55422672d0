use crate::codec::{wire_serde, Discriminated, Envelope, Family, Registry, WireObject};
use crate::error::{DecodeError, EncodeError};
use crate::types::UserId;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

/// A workspace member or integration.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub user_type: UserType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserType {
    Person(Person),
    Bot(BotDetails),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Bot payload, kept as the API sent it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BotDetails(pub Map<String, Value>);

impl User {
    pub fn email(&self) -> Option<&str> {
        match &self.user_type {
            UserType::Person(person) => person.email.as_deref(),
            UserType::Bot(_) => None,
        }
    }

    pub fn is_bot(&self) -> bool {
        matches!(self.user_type, UserType::Bot(_))
    }

    fn materialize(env: &Envelope<'_>, user_type: UserType) -> Result<Self, DecodeError> {
        let fields = env.fields();
        Ok(Self {
            id: fields.get("id")?,
            name: fields.optional("name")?,
            avatar_url: fields.optional("avatar_url")?,
            user_type,
        })
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, self.email()) {
            (Some(name), _) => write!(f, "{}", name),
            (None, Some(email)) => write!(f, "{}", email),
            (None, None) => write!(f, "User {}", self.id),
        }
    }
}

static REGISTRY: Lazy<Registry<User>> = Lazy::new(|| {
    Registry::new(Family::User)
        .with("person", |env| {
            let person: Person = env.fields().optional("person")?.unwrap_or_default();
            User::materialize(env, UserType::Person(person))
        })
        .with("bot", |env| {
            let bot: BotDetails = env.fields().optional("bot")?.unwrap_or_default();
            User::materialize(env, UserType::Bot(bot))
        })
});

impl Discriminated for User {
    fn registry() -> &'static Registry<Self> {
        &REGISTRY
    }

    fn tag(&self) -> &str {
        match self.user_type {
            UserType::Person(_) => "person",
            UserType::Bot(_) => "bot",
        }
    }

    fn encode(&self) -> Result<Value, EncodeError> {
        let wire = WireObject::tagged(Self::TAG_FIELD, self.tag())
            .value("object", json!("user"))
            .field("id", &self.id)?
            .optional("name", self.name.as_ref())?
            .optional("avatar_url", self.avatar_url.as_ref())?;
        let wire = match &self.user_type {
            UserType::Person(person) => wire.field("person", person)?,
            UserType::Bot(bot) => wire.field("bot", bot)?,
        };
        Ok(wire.build())
    }
}

wire_serde!(User);
