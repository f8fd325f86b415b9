use crate::capability::subsystem::{EntryPointDecl, ParamShape};

/// The capabilities the binder looks for, one descriptor each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Zero-parameter query answering "is this peer authoritative".
    RoleQuery,
    /// Generic registration point accepting one callback.
    ReceiveRegister,
    /// Generic send point accepting a payload plus trailing knobs.
    BroadcastSend,
}

impl Capability {
    pub fn name(&self) -> &'static str {
        match self {
            Capability::RoleQuery => "role-query",
            Capability::ReceiveRegister => "receive-register",
            Capability::BroadcastSend => "broadcast-send",
        }
    }
}

/// How a descriptor matches an entry point's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameRule {
    /// Case-insensitive equality.
    Exact(&'static str),
    /// Case-insensitive substring; any one of the listed fragments matches.
    AnyFragment(&'static [&'static str]),
}

impl NameRule {
    pub fn matches(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        match self {
            NameRule::Exact(expected) => lowered == expected.to_lowercase(),
            NameRule::AnyFragment(fragments) => fragments
                .iter()
                .any(|fragment| lowered.contains(&fragment.to_lowercase())),
        }
    }
}

/// How a descriptor constrains the count of declared value parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArityRule {
    Exactly(usize),
    AtLeast(usize),
}

impl ArityRule {
    pub fn matches(&self, count: usize) -> bool {
        match self {
            ArityRule::Exactly(n) => count == *n,
            ArityRule::AtLeast(n) => count >= *n,
        }
    }
}

/// The rule set the binder uses to recognize one capability among a
/// subsystem's declared entry points: a name rule, a generic arity, a
/// value-parameter arity rule, and a predicate over the declared shapes.
pub struct EntryPointDescriptor {
    pub capability: Capability,
    pub name_rule: NameRule,
    pub type_params: u8,
    pub arity: ArityRule,
    pub shape_rule: fn(&[ParamShape]) -> bool,
}

impl EntryPointDescriptor {
    /// True when the declared entry point satisfies every rule.
    pub fn matches(&self, decl: &EntryPointDecl) -> bool {
        self.name_rule.matches(&decl.name)
            && decl.type_params == self.type_params
            && self.arity.matches(decl.params.len())
            && (self.shape_rule)(&decl.params)
    }
}

/// The built-in descriptor set, one per capability the crate needs.
pub fn builtin_descriptors() -> [EntryPointDescriptor; 3] {
    [
        EntryPointDescriptor {
            capability: Capability::RoleQuery,
            name_rule: NameRule::AnyFragment(&["authoritative", "server", "host"]),
            type_params: 0,
            arity: ArityRule::Exactly(0),
            shape_rule: |_params| true,
        },
        EntryPointDescriptor {
            capability: Capability::ReceiveRegister,
            name_rule: NameRule::AnyFragment(&["register"]),
            type_params: 1,
            arity: ArityRule::Exactly(1),
            shape_rule: |params| matches!(params, [ParamShape::Callback]),
        },
        EntryPointDescriptor {
            capability: Capability::BroadcastSend,
            name_rule: NameRule::AnyFragment(&["send"]),
            type_params: 1,
            arity: ArityRule::AtLeast(1),
            shape_rule: |params| matches!(params.first(), Some(ParamShape::Payload)),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::{builtin_descriptors, Capability, NameRule};
    use crate::capability::subsystem::{EntryPointDecl, ParamShape};

    fn descriptor_for(capability: Capability) -> super::EntryPointDescriptor {
        builtin_descriptors()
            .into_iter()
            .find(|descriptor| descriptor.capability == capability)
            .unwrap()
    }

    #[test]
    fn name_rules_are_case_insensitive() {
        let exact = NameRule::Exact("IsServer");
        assert!(exact.matches("isserver"));
        assert!(!exact.matches("isserver2"));

        let fragment = NameRule::AnyFragment(&["host"]);
        assert!(fragment.matches("QueryHostState"));
        assert!(!fragment.matches("QueryPeerState"));
    }

    #[test]
    fn role_query_requires_zero_params() {
        let descriptor = descriptor_for(Capability::RoleQuery);

        assert!(descriptor.matches(&EntryPointDecl::new("IsServerAuthoritative", 0, vec![])));
        assert!(!descriptor.matches(&EntryPointDecl::new(
            "IsServerAuthoritative",
            0,
            vec![ParamShape::Flag]
        )));
        assert!(!descriptor.matches(&EntryPointDecl::new("IsServerAuthoritative", 1, vec![])));
    }

    #[test]
    fn receive_register_requires_single_callback() {
        let descriptor = descriptor_for(Capability::ReceiveRegister);

        assert!(descriptor.matches(&EntryPointDecl::new(
            "RegisterPacket",
            1,
            vec![ParamShape::Callback]
        )));
        assert!(!descriptor.matches(&EntryPointDecl::new(
            "RegisterPacket",
            1,
            vec![ParamShape::Payload]
        )));
        assert!(!descriptor.matches(&EntryPointDecl::new(
            "RegisterPacket",
            2,
            vec![ParamShape::Callback]
        )));
    }

    #[test]
    fn broadcast_send_requires_leading_payload() {
        let descriptor = descriptor_for(Capability::BroadcastSend);

        assert!(descriptor.matches(&EntryPointDecl::new(
            "SendDataToAll",
            1,
            vec![
                ParamShape::Payload,
                ParamShape::Mode {
                    variants: vec!["Unreliable".to_string(), "ReliableOrdered".to_string()],
                },
                ParamShape::Flag,
            ]
        )));
        assert!(!descriptor.matches(&EntryPointDecl::new(
            "SendDataToAll",
            1,
            vec![ParamShape::Flag, ParamShape::Payload]
        )));
        assert!(!descriptor.matches(&EntryPointDecl::new("SendDataToAll", 1, vec![])));
    }
}
