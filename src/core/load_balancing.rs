use crate::core::client::Client;
use crate::core::errors::Result;
use crate::core::transport::Transport;

/*-------------------------------------------------------------------------------------------------
  Load Balancing
-------------------------------------------------------------------------------------------------*/

impl<T: Transport> Client<T> {
    /// List the service names of the account's IP load balancers.
    pub fn list_load_balancing(&self) -> Result<Vec<String>> {
        self.transport()
            .get("ip/loadBalancing")?
            .expect_status(&[200])?
            .json()
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::Error;
    use crate::core::transport::tests::MockTransport;

    #[test]
    fn test_list_load_balancing() {
        let transport = MockTransport::new().respond(200, r#"["ip-lb-1","ip-lb-2"]"#);

        let services = Client::with_transport(&transport)
            .list_load_balancing()
            .unwrap();

        assert_eq!(services, ["ip-lb-1", "ip-lb-2"]);
        assert_eq!(transport.only_request().path, "ip/loadBalancing");
    }

    #[test]
    fn test_list_load_balancing_decode_error() {
        let transport = MockTransport::new().respond(200, r#"{"ip-lb-1": true}"#);
        let result = Client::with_transport(&transport).list_load_balancing();
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
