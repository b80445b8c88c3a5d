use super::types::*;
use crate::analysis::linearize;
use crate::contract::{CheckerConfig, ContractChecker, InterfaceDescriptor, InterfaceError};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::debug;

/// Registration table for declared types, keyed by `(owning type, member name)`.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    // Columnar arrays, indexed by TypeId
    pub(crate) names: Vec<String>,
    pub(crate) docs: Vec<Option<String>>,
    pub(crate) own_names: Vec<Vec<String>>,

    // Topology: declared bases (CSR) and the linearized chain, most derived first
    pub(crate) bases_flat: Vec<TypeId>,
    pub(crate) bases_ranges: Vec<(u32, u32)>,
    pub(crate) chains: Vec<Vec<TypeId>>,

    // Own members per type, indexed by TypeId
    pub(crate) members: Vec<HashMap<String, Member>>,
    pub(crate) interfaces: HashMap<TypeId, InterfaceDescriptor>,
    // cls -> interfaces it was checked against
    pub(crate) conformance: BTreeMap<TypeId, BTreeSet<TypeId>>,

    pub(crate) used_names: HashMap<String, TypeId>,
    pub(crate) config: CheckerConfig,
}

impl Registry {
    pub fn new() -> Self { Self::default() }

    pub fn with_config(config: CheckerConfig) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn config(&self) -> &CheckerConfig { &self.config }
    pub fn set_config(&mut self, config: CheckerConfig) { self.config = config; }

    pub fn count(&self) -> usize { self.names.len() }

    pub fn contains(&self, id: TypeId) -> bool { id.index() < self.count() }

    pub(crate) fn ensure_known(&self, id: TypeId) -> Result<(), InterfaceError> {
        if self.contains(id) { Ok(()) } else { Err(InterfaceError::UnknownType(id)) }
    }

    /// Declares a new type. Bases must already be declared.
    pub fn declare(&mut self, decl: TypeDecl) -> Result<TypeId, InterfaceError> {
        let TypeDecl { name, doc, bases, members } = decl;

        if self.used_names.contains_key(&name) {
            return Err(InterfaceError::DuplicateType(name));
        }
        let mut seen_bases = HashSet::new();
        for &base in &bases {
            self.ensure_known(base)?;
            if !seen_bases.insert(base) {
                return Err(InterfaceError::DuplicateBase {
                    name,
                    base: self.type_name(base).to_string(),
                });
            }
        }
        let mut seen_members = HashSet::new();
        for member in &members {
            if !seen_members.insert(member.name.as_str()) {
                return Err(InterfaceError::DuplicateMember {
                    name,
                    member: member.name.clone(),
                });
            }
        }

        let id = TypeId::new(self.count());
        let chain = linearize::c3(id, &bases, &self.chains)
            .ok_or_else(|| InterfaceError::InconsistentHierarchy(name.clone()))?;

        // 1. Bases
        let start = self.bases_flat.len() as u32;
        self.bases_flat.extend_from_slice(&bases);
        self.bases_ranges.push((start, bases.len() as u32));
        self.chains.push(chain);

        // 2. Members
        let mut own = Vec::with_capacity(members.len());
        let mut table = HashMap::with_capacity(members.len());
        for member in members {
            own.push(member.name.clone());
            table.insert(member.name.clone(), member);
        }
        self.own_names.push(own);
        self.members.push(table);

        // 3. Metadata
        debug!(type_name = %name, id = id.0, bases = bases.len(), "declared type");
        self.used_names.insert(name.clone(), id);
        self.names.push(name);
        self.docs.push(doc);

        Ok(id)
    }

    /// Declares a type and immediately turns it into an interface.
    pub fn declare_interface(&mut self, decl: TypeDecl) -> Result<TypeId, InterfaceError> {
        let id = self.declare(decl)?;
        self.define(id)
    }

    /// Collects the required members visible on `cls` into its interface descriptor.
    ///
    /// The descriptor is rebuilt from scratch, so requirements inherited from base
    /// interfaces are accumulated.
    pub fn define(&mut self, cls: TypeId) -> Result<TypeId, InterfaceError> {
        self.ensure_known(cls)?;
        let descriptor = InterfaceDescriptor::collect(self, cls);
        debug!(
            interface = %self.type_name(cls),
            required = descriptor.required_attrs.len(),
            classmethods = descriptor.required_classmethods.len(),
            "defined interface"
        );
        self.interfaces.insert(cls, descriptor);
        Ok(cls)
    }

    /// Checks `cls` against every interface in order and records the conformance.
    pub fn implement(
        &mut self,
        interfaces: &[TypeId],
        cls: TypeId,
    ) -> Result<TypeId, InterfaceError> {
        ContractChecker::new(self).check_implementation(interfaces, cls)?;
        self.conformance.entry(cls).or_default().extend(interfaces.iter().copied());
        Ok(cls)
    }

    /// Runs only the final-override check on `cls`.
    pub fn strict(&self, cls: TypeId) -> Result<TypeId, InterfaceError> {
        ContractChecker::new(self).check_strict(cls)?;
        Ok(cls)
    }

    // --- Queries ---

    pub fn type_name(&self, id: TypeId) -> &str { &self.names[id.index()] }
    pub fn type_doc(&self, id: TypeId) -> Option<&str> { self.docs[id.index()].as_deref() }
    pub fn lookup(&self, name: &str) -> Option<TypeId> { self.used_names.get(name).copied() }

    #[inline(always)]
    pub fn bases(&self, id: TypeId) -> &[TypeId] {
        let (start, count) = self.bases_ranges[id.index()];
        &self.bases_flat[start as usize..(start + count) as usize]
    }

    /// The linearized chain of `id`, starting with `id` itself.
    pub fn chain(&self, id: TypeId) -> &[TypeId] { &self.chains[id.index()] }

    pub fn is_subclass(&self, id: TypeId, ancestor: TypeId) -> bool {
        self.chain(id).contains(&ancestor)
    }

    pub fn interface(&self, id: TypeId) -> Option<&InterfaceDescriptor> { self.interfaces.get(&id) }

    pub fn is_interface(&self, id: TypeId) -> bool { self.interfaces.contains_key(&id) }

    /// Member declared directly on `id`, ignoring inheritance.
    pub fn own_member(&self, id: TypeId, name: &str) -> Option<&Member> {
        self.members[id.index()].get(name)
    }

    pub fn own_members(&self, id: TypeId) -> impl Iterator<Item = &Member> + '_ {
        let table = &self.members[id.index()];
        self.own_names[id.index()].iter().filter_map(move |name| table.get(name))
    }

    /// Standard lookup: the first definition of `name` along the chain.
    pub fn resolve(&self, id: TypeId, name: &str) -> Option<(TypeId, &Member)> {
        self.resolve_in(self.chain(id), name)
    }

    fn resolve_in<'s>(&'s self, chain: &[TypeId], name: &str) -> Option<(TypeId, &'s Member)> {
        chain
            .iter()
            .find_map(|&owner| self.own_member(owner, name).map(|m| (owner, m)))
    }

    /// Every member name resolvable on `id`, sorted.
    pub fn dir(&self, id: TypeId) -> BTreeSet<&str> {
        self.chain(id)
            .iter()
            .flat_map(|owner| self.own_names[owner.index()].iter().map(String::as_str))
            .collect()
    }

    pub fn attribute(&self, id: TypeId, name: &str) -> Option<&Value> {
        match self.resolve(id, name) {
            Some((_, Member { kind: MemberKind::Attribute(value), .. })) => Some(value),
            _ => None,
        }
    }

    // --- Conformance ---

    pub fn conforms_to(&self, cls: TypeId, interface: TypeId) -> bool {
        self.conformance.get(&cls).is_some_and(|set| set.contains(&interface))
    }

    pub fn implementations_of(&self, interface: TypeId) -> Vec<TypeId> {
        self.conformance
            .iter()
            .filter(|(_, set)| set.contains(&interface))
            .map(|(&cls, _)| cls)
            .collect()
    }

    // --- Invocation ---

    /// Invokes `name` through `id`. Hitting a required placeholder fails with
    /// `MissingRequiredAttribute`.
    pub fn call(&self, id: TypeId, name: &str, args: &[Value]) -> Result<Value, InterfaceError> {
        self.ensure_known(id)?;
        let found = self.resolve(id, name);
        self.invoke(id, name, found, args)
    }

    /// Invokes the definition of `name` that follows `after` in the chain of `receiver`.
    pub fn call_after(
        &self,
        receiver: TypeId,
        after: TypeId,
        name: &str,
        args: &[Value],
    ) -> Result<Value, InterfaceError> {
        self.ensure_known(receiver)?;
        let chain = self.chain(receiver);
        let rest = match chain.iter().position(|&t| t == after) {
            Some(pos) => &chain[pos + 1..],
            None => &chain[chain.len()..],
        };
        let found = self.resolve_in(rest, name);
        self.invoke(receiver, name, found, args)
    }

    fn invoke(
        &self,
        receiver: TypeId,
        name: &str,
        found: Option<(TypeId, &Member)>,
        args: &[Value],
    ) -> Result<Value, InterfaceError> {
        let (owner, member) = found.ok_or_else(|| InterfaceError::UnknownMember {
            type_name: self.type_name(receiver).to_string(),
            member: name.to_string(),
        })?;
        if !member.is_callable() {
            return Err(InterfaceError::NotCallable {
                type_name: self.type_name(receiver).to_string(),
                member: name.to_string(),
            });
        }
        match &member.body {
            Body::Sentinel => {
                Err(InterfaceError::MissingRequiredAttribute(member.missing_message()))
            }
            Body::Concrete(f) => {
                let ctx = CallContext { registry: self, receiver, owner, name };
                f(&ctx, args)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn greeter(reg: &mut Registry) -> TypeId {
        reg.declare(
            TypeDecl::new("Greeter")
                .member(Member::method("greet").body(|_, args| {
                    let who = args[0].as_str().unwrap_or_default();
                    Ok(json!(format!("hello {who}")))
                }))
                .member(Member::attribute("greeting", json!("hello"))),
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_prefers_most_derived() {
        let mut reg = Registry::new();
        let base = greeter(&mut reg);
        let child = reg
            .declare(
                TypeDecl::new("Child")
                    .base(base)
                    .member(Member::method("greet").body(|_, _| Ok(json!("hi")))),
            )
            .unwrap();

        let (owner, _) = reg.resolve(child, "greet").unwrap();
        assert_eq!(owner, child);
        let (owner, _) = reg.resolve(child, "greeting").unwrap();
        assert_eq!(owner, base);
        assert_eq!(reg.call(child, "greet", &[]).unwrap(), json!("hi"));
        assert_eq!(reg.attribute(child, "greeting"), Some(&json!("hello")));
    }

    #[test]
    fn test_dir_is_sorted_and_includes_inherited() {
        let mut reg = Registry::new();
        let base = greeter(&mut reg);
        let child = reg
            .declare(TypeDecl::new("Child").base(base).member(Member::method("apply")))
            .unwrap();

        let names: Vec<&str> = reg.dir(child).into_iter().collect();
        assert_eq!(names, vec!["apply", "greet", "greeting"]);
    }

    #[test]
    fn test_call_super_runs_next_definition() {
        let mut reg = Registry::new();
        let base = greeter(&mut reg);
        let child = reg
            .declare(TypeDecl::new("Loud").base(base).member(Member::method("greet").body(
                |ctx, args| {
                    let inner = ctx.call_super(args)?;
                    Ok(json!(inner.as_str().unwrap_or_default().to_uppercase()))
                },
            )))
            .unwrap();

        assert_eq!(reg.call(child, "greet", &[json!("bob")]).unwrap(), json!("HELLO BOB"));
    }

    #[test]
    fn test_call_rejects_unknown_and_non_callable() {
        let mut reg = Registry::new();
        let base = greeter(&mut reg);

        let err = reg.call(base, "missing", &[]).unwrap_err();
        assert!(matches!(err, InterfaceError::UnknownMember { .. }));
        let err = reg.call(base, "greeting", &[]).unwrap_err();
        assert!(matches!(err, InterfaceError::NotCallable { .. }));
        let err = reg.call(TypeId(42), "greet", &[]).unwrap_err();
        assert_eq!(err, InterfaceError::UnknownType(TypeId(42)));
    }

    #[test]
    fn test_declare_rejects_duplicates() {
        let mut reg = Registry::new();
        let base = greeter(&mut reg);

        let err = reg.declare(TypeDecl::new("Greeter")).unwrap_err();
        assert_eq!(err, InterfaceError::DuplicateType("Greeter".into()));

        let err = reg.declare(TypeDecl::new("Twice").base(base).base(base)).unwrap_err();
        assert!(matches!(err, InterfaceError::DuplicateBase { .. }));

        let err = reg
            .declare(TypeDecl::new("Clash").member(Member::method("a")).member(Member::method("a")))
            .unwrap_err();
        assert!(matches!(err, InterfaceError::DuplicateMember { .. }));

        // Failed declarations leave no trace behind.
        assert_eq!(reg.count(), 1);
        assert_eq!(reg.lookup("Greeter"), Some(base));
        assert_eq!(reg.lookup("Clash"), None);
    }

    #[test]
    fn test_own_members_keep_declaration_order() {
        let mut reg = Registry::new();
        let id = reg
            .declare(
                TypeDecl::new("Ordered")
                    .member(Member::method("zeta"))
                    .member(Member::method("alpha")),
            )
            .unwrap();

        let names: Vec<&str> = reg.own_members(id).map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert!(reg.own_member(id, "alpha").is_some());
        assert!(reg.own_member(id, "beta").is_none());
    }

    #[test]
    fn test_is_subclass_follows_the_chain() {
        let mut reg = Registry::new();
        let base = greeter(&mut reg);
        let middle = reg.declare(TypeDecl::new("Middle").base(base)).unwrap();
        let leaf = reg.declare(TypeDecl::new("Leaf").base(middle)).unwrap();
        let other = reg.declare(TypeDecl::new("Other")).unwrap();

        assert!(reg.is_subclass(leaf, base));
        assert!(reg.is_subclass(leaf, leaf));
        assert!(!reg.is_subclass(base, leaf));
        assert!(!reg.is_subclass(leaf, other));
    }
}
