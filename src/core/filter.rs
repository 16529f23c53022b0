use crate::core::ip_block::IpBlock;
use crate::core::ip_type::IpType;
use log::trace;

/*-------------------------------------------------------------------------------------------------
  BlockFilterBuilder
-------------------------------------------------------------------------------------------------*/

/// Builder used to construct a [BlockFilter] with the desired filter parameters.
///
/// Empty strings leave the corresponding filter unset, so values taken straight from user input
/// can be passed through without checking them first.
///
/// ```rust
/// use ipblocks::{BlockFilterBuilder, IpType};
///
/// let filter = BlockFilterBuilder::new()
///     .description("web frontend")
///     .ip_type(IpType::Vps)
///     .build();
///
/// assert_eq!(filter.query_string(), "?description=web%20frontend&type=vps");
/// ```
#[derive(Clone, Debug, Default)]
pub struct BlockFilterBuilder {
    description: Option<String>,
    ip: Option<IpBlock>,
    routed_to: Option<String>,
    ip_type: Option<IpType>,
}

/*--------------------------------------------------------------------------------------
  Block Filter Builder Implementation
--------------------------------------------------------------------------------------*/

impl BlockFilterBuilder {
    /// Create a new [BlockFilterBuilder]; by default no filter parameters are set and the
    /// resulting filter matches every block of the account.
    pub fn new() -> Self {
        Self::default()
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Include blocks with this description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = non_empty(description);
        self
    }

    /// Include only this block.
    pub fn ip(mut self, ip: &str) -> Self {
        self.ip = non_empty(ip).map(IpBlock::from);
        self
    }

    /// Include blocks routed to this service.
    pub fn routed_to(mut self, service_name: &str) -> Self {
        self.routed_to = non_empty(service_name);
        self
    }

    /// Include blocks of this type.
    pub fn ip_type(mut self, ip_type: IpType) -> Self {
        self.ip_type = non_empty(ip_type.as_str()).map(|_| ip_type);
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    /// Build the [BlockFilter] with the provided filter parameters.
    pub fn build(self) -> BlockFilter {
        BlockFilter {
            description: self.description,
            ip: self.ip,
            routed_to: self.routed_to,
            ip_type: self.ip_type,
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  BlockFilter
-------------------------------------------------------------------------------------------------*/

/// Server-side filter for [crate::Client::list_blocks]. Every parameter that is set becomes one
/// query parameter; the service ANDs them together.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BlockFilter {
    description: Option<String>,
    ip: Option<IpBlock>,
    routed_to: Option<String>,
    ip_type: Option<IpType>,
}

impl BlockFilter {
    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn ip(&self) -> Option<&IpBlock> {
        self.ip.as_ref()
    }

    pub fn routed_to(&self) -> Option<&str> {
        self.routed_to.as_deref()
    }

    pub fn ip_type(&self) -> Option<&IpType> {
        self.ip_type.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.query_parameters().is_empty()
    }

    /*-------------------------------------------------------------------------
      Query String
    -------------------------------------------------------------------------*/

    /// The set parameters as escaped `name=value` pairs, in a fixed order.
    pub(crate) fn query_parameters(&self) -> Vec<String> {
        let parameters = [
            ("description", self.description()),
            ("ip", self.ip().map(IpBlock::as_str)),
            ("routedTo.serviceName", self.routed_to()),
            ("type", self.ip_type().map(IpType::as_str)),
        ];

        parameters
            .into_iter()
            .filter_map(|(name, value)| {
                let Some(value) = value else {
                    trace!("No `{name}` filter");
                    return None;
                };
                Some(format!("{name}={}", urlencoding::encode(value)))
            })
            .collect()
    }

    /// The query string to append to the list path: empty when no parameter is set, otherwise a
    /// single leading `?` followed by `&`-separated parameters.
    pub fn query_string(&self) -> String {
        let parameters = self.query_parameters();
        if parameters.is_empty() {
            String::new()
        } else {
            format!("?{}", parameters.join("&"))
        }
    }
}

/*--------------------------------------------------------------------------------------
  Helper Functions
--------------------------------------------------------------------------------------*/

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    /*----------------------------------------------------------------------------------
      Block Filter Builder and Block Filter
    ----------------------------------------------------------------------------------*/

    /*-------------------------------------------------------------------------
      Test Getter and Setter Methods
    -------------------------------------------------------------------------*/

    #[test]
    fn test_getter_and_setter_methods() {
        let filter = BlockFilterBuilder::new()
            .description("mail relays")
            .ip("91.121.78.0/24")
            .routed_to("ns3001234.ip-91-121-78.eu")
            .ip_type(IpType::Dedicated)
            .build();

        assert_eq!(filter.description(), Some("mail relays"));
        assert_eq!(filter.ip(), Some(&IpBlock::from("91.121.78.0/24")));
        assert_eq!(filter.routed_to(), Some("ns3001234.ip-91-121-78.eu"));
        assert_eq!(filter.ip_type(), Some(&IpType::Dedicated));
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_empty_values_leave_filters_unset() {
        let filter = BlockFilterBuilder::new()
            .description("")
            .ip("")
            .routed_to("")
            .ip_type(IpType::Other(String::new()))
            .build();

        assert_eq!(filter, BlockFilter::default());
        assert!(filter.is_empty());
        assert_eq!(filter.query_string(), "");
    }

    /*-------------------------------------------------------------------------
      Test Query String
    -------------------------------------------------------------------------*/

    #[test]
    fn test_query_string_single_type_filter() {
        let filter = BlockFilterBuilder::new().ip_type(IpType::Vps).build();
        assert_eq!(filter.query_string(), "?type=vps");
    }

    #[test]
    fn test_query_string_description_and_type() {
        let filter = BlockFilterBuilder::new()
            .ip_type(IpType::Vps)
            .description("front")
            .build();
        assert_eq!(filter.query_string(), "?description=front&type=vps");
    }

    #[test]
    fn test_query_string_all_filters_are_escaped() {
        let filter = BlockFilterBuilder::new()
            .description("a&b=c")
            .ip("10.0.0.0/24")
            .routed_to("srv 1")
            .ip_type(IpType::HostedSsl)
            .build();
        assert_eq!(
            filter.query_string(),
            "?description=a%26b%3Dc&ip=10.0.0.0%2F24&routedTo.serviceName=srv%201&type=hosted_ssl"
        );
    }
}
