use crate::error::{ManagementError, ManagementResult};
use std::fmt;
use std::str::FromStr;

/// A parsed Azure Resource Manager id.
///
/// Format: `/subscriptions/{sub}/resourceGroups/{rg}/providers/{provider}/{type}/{name}[/{type}/{name}...]`.
/// Ids returned by the service (e.g. `partnerNamespace`, `targetNamespace`)
/// can be fed back into operation groups through these parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    subscription_id: String,
    resource_group: String,
    provider: String,
    /// `(type, name)` from the outermost resource inward
    resources: Vec<(String, String)>,
}

impl ResourceId {
    pub fn parse(id: &str) -> ManagementResult<Self> {
        let invalid = |reason: &str| {
            ManagementError::InvalidParameter(format!("Invalid resource ID '{id}': {reason}"))
        };

        let parts: Vec<&str> = id.trim_matches('/').split('/').collect();
        if parts.len() < 8 {
            return Err(invalid("too few segments"));
        }
        if !parts[0].eq_ignore_ascii_case("subscriptions") {
            return Err(invalid("expected 'subscriptions'"));
        }
        if !parts[2].eq_ignore_ascii_case("resourceGroups") {
            return Err(invalid("expected 'resourceGroups'"));
        }
        if !parts[4].eq_ignore_ascii_case("providers") {
            return Err(invalid("expected 'providers'"));
        }
        if parts.iter().any(|p| p.is_empty()) {
            return Err(invalid("empty segment"));
        }

        let tail = &parts[6..];
        if tail.len() % 2 != 0 {
            return Err(invalid("resource type without a name"));
        }

        Ok(Self {
            subscription_id: parts[1].to_string(),
            resource_group: parts[3].to_string(),
            provider: parts[5].to_string(),
            resources: tail
                .chunks(2)
                .map(|pair| (pair[0].to_string(), pair[1].to_string()))
                .collect(),
        })
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    pub fn resource_group(&self) -> &str {
        &self.resource_group
    }

    /// Provider namespace, e.g. `Microsoft.ServiceBus`.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Name of the innermost resource.
    pub fn name(&self) -> &str {
        self.resources
            .last()
            .map(|(_, name)| name.as_str())
            .unwrap_or_default()
    }

    /// Type chain, e.g. `namespaces/queues`.
    pub fn resource_type(&self) -> String {
        self.resources
            .iter()
            .map(|(t, _)| t.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Name of the first resource when it is a Service Bus namespace.
    pub fn namespace_name(&self) -> Option<&str> {
        self.resources
            .first()
            .filter(|(t, _)| t.eq_ignore_ascii_case("namespaces"))
            .map(|(_, name)| name.as_str())
    }

    /// Name of the resource of type `resource_type` in the chain, if any.
    pub fn child(&self, resource_type: &str) -> Option<&str> {
        self.resources
            .iter()
            .find(|(t, _)| t.eq_ignore_ascii_case(resource_type))
            .map(|(_, name)| name.as_str())
    }

    pub fn resources(&self) -> &[(String, String)] {
        &self.resources
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/subscriptions/{}/resourceGroups/{}/providers/{}",
            self.subscription_id, self.resource_group, self.provider
        )?;
        for (resource_type, name) in &self.resources {
            write!(f, "/{resource_type}/{name}")?;
        }
        Ok(())
    }
}

impl FromStr for ResourceId {
    type Err = ManagementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
