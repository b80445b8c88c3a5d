//! Serializable snapshots of declared types, for inspection and export.
use super::registry::Registry;
use super::types::{Markers, Signature, TypeId};
use crate::contract::{InterfaceDescriptor, InterfaceError};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberSummary {
    pub name: String,
    pub kind: &'static str,
    pub markers: Markers,
    pub placeholder: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    pub bases: Vec<String>,
    /// Linearized chain, the type itself first.
    pub chain: Vec<String>,
    pub members: Vec<MemberSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<InterfaceDescriptor>,
    pub implements: Vec<String>,
}

impl Registry {
    pub fn describe(&self, id: TypeId) -> Result<TypeSummary, InterfaceError> {
        self.ensure_known(id)?;
        let names = |ids: &[TypeId]| -> Vec<String> {
            ids.iter().map(|&t| self.type_name(t).to_string()).collect()
        };

        let members = self
            .own_members(id)
            .map(|m| MemberSummary {
                name: m.name.clone(),
                kind: m.kind.label(),
                markers: m.markers,
                placeholder: m.is_sentinel(),
                doc: m.doc.clone(),
                signature: m.signature.clone(),
            })
            .collect();
        let implements: Vec<TypeId> = self
            .conformance
            .get(&id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();

        Ok(TypeSummary {
            name: self.type_name(id).to_string(),
            doc: self.type_doc(id).map(str::to_string),
            bases: names(self.bases(id)),
            chain: names(self.chain(id)),
            members,
            interface: self.interface(id).cloned(),
            implements: names(implements.as_slice()),
        })
    }

    pub fn describe_json(&self, id: TypeId) -> Result<String, InterfaceError> {
        let summary = self.describe(id)?;
        serde_json::to_string_pretty(&summary).map_err(|e| InterfaceError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use crate::store::{Member, Registry, Signature, TypeDecl};
    use serde_json::json;

    #[test]
    fn test_describe_interface_and_implementation() {
        let mut reg = Registry::new();
        let iface = reg
            .declare_interface(
                TypeDecl::new("StringInterface").doc("Turns arguments into strings.").member(
                    Member::method("execute")
                        .doc("Execute must be implemented with an 'argument' option.")
                        .signature(Signature::new(["argument"]))
                        .required(),
                ),
            )
            .unwrap();
        let cls = reg
            .declare(
                TypeDecl::new("Broifier").base(iface).member(Member::method("execute").final_()),
            )
            .unwrap();
        reg.implement(&[iface], cls).unwrap();

        let summary = reg.describe(cls).unwrap();
        assert_eq!(summary.chain, vec!["Broifier", "StringInterface"]);
        assert_eq!(summary.implements, vec!["StringInterface"]);
        assert!(summary.interface.is_none());
        assert!(summary.members[0].markers.final_);

        let json = reg.describe_json(iface).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["interface"]["required_attrs"], json!(["execute"]));
        assert_eq!(value["members"][0]["markers"]["required"], json!(true));
        assert_eq!(value["members"][0]["placeholder"], json!(true));
        assert_eq!(value["members"][0]["signature"]["params"], json!(["argument"]));
        assert_eq!(value["doc"], json!("Turns arguments into strings."));
    }
}
