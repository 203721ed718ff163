use lasr_core::AddressOrNamespace;
use serde::{Deserialize, Serialize};

use crate::fields::{ProgramUpdateField, TokenUpdateField};

/// Ordered field mutations applied to one token held by `account`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUpdate {
    /// Account whose holding is updated
    account: AddressOrNamespace,
    /// Program the token belongs to
    token: AddressOrNamespace,
    updates: Vec<TokenUpdateField>,
}

impl TokenUpdate {
    pub fn new(
        account: AddressOrNamespace,
        token: AddressOrNamespace,
        updates: Vec<TokenUpdateField>,
    ) -> Self {
        Self {
            account,
            token,
            updates,
        }
    }

    pub fn account(&self) -> &AddressOrNamespace {
        &self.account
    }

    pub fn token(&self) -> &AddressOrNamespace {
        &self.token
    }

    pub fn updates(&self) -> &[TokenUpdateField] {
        &self.updates
    }
}

/// Ordered field mutations applied to one program account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramUpdate {
    account: AddressOrNamespace,
    updates: Vec<ProgramUpdateField>,
}

impl ProgramUpdate {
    pub fn new(account: AddressOrNamespace, updates: Vec<ProgramUpdateField>) -> Self {
        Self { account, updates }
    }

    pub fn account(&self) -> &AddressOrNamespace {
        &self.account
    }

    pub fn updates(&self) -> &[ProgramUpdateField] {
        &self.updates
    }
}

/// A token or a program update, tagged `tokenUpdate` / `programUpdate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenOrProgramUpdate {
    TokenUpdate(TokenUpdate),
    ProgramUpdate(ProgramUpdate),
}

impl From<TokenUpdate> for TokenOrProgramUpdate {
    fn from(update: TokenUpdate) -> Self {
        TokenOrProgramUpdate::TokenUpdate(update)
    }
}

impl From<ProgramUpdate> for TokenOrProgramUpdate {
    fn from(update: ProgramUpdate) -> Self {
        TokenOrProgramUpdate::ProgramUpdate(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::MapUpdate;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn entries(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_token_update_keeps_field_order() {
        let update = TokenUpdate::new(
            AddressOrNamespace::This,
            AddressOrNamespace::This,
            vec![
                TokenUpdateField::metadata(MapUpdate::Extend(entries(&[("symbol", "DMO")]))),
                TokenUpdateField::data(MapUpdate::Extend(entries(&[("type", "fungible")]))),
            ],
        );

        let json = serde_json::to_value(TokenOrProgramUpdate::from(update)).unwrap();
        assert_eq!(
            json,
            json!({
                "tokenUpdate": {
                    "account": "this",
                    "token": "this",
                    "updates": [
                        { "field": "metadata", "value": { "metadata": { "extend": { "symbol": "DMO" } } } },
                        { "field": "data", "value": { "data": { "extend": { "type": "fungible" } } } }
                    ]
                }
            })
        );
        assert_eq!(json["tokenUpdate"]["updates"][0]["field"], json!("metadata"));
        assert_eq!(json["tokenUpdate"]["updates"][1]["field"], json!("data"));
    }

    #[test]
    fn test_program_update_round_trip() {
        let update: TokenOrProgramUpdate = ProgramUpdate::new(
            AddressOrNamespace::This,
            vec![ProgramUpdateField::metadata(MapUpdate::Insert(
                "name".into(),
                "Demo".into(),
            ))],
        )
        .into();

        let text = serde_json::to_string(&update).unwrap();
        assert!(text.starts_with("{\"programUpdate\":"));

        let back: TokenOrProgramUpdate = serde_json::from_str(&text).unwrap();
        assert_eq!(back, update);
    }
}
