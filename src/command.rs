use log::*;
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{
    ThetaError, ThetaResult, consts,
    transport::{ByteStream, HttpReply, Transport},
    wire::{
        CommandRequest, CommandResponse, CommandState, ErrorOnlyBody, NoParams, OptionsWire,
        SetOptionsParams, StatusRequest,
    },
};

/// Decodes a reply body into `R`.
///
/// A body which parses is returned whatever the HTTP status, since the camera sends
/// error envelopes with 4xx codes. Otherwise the failure becomes a [`ThetaError::WebApi`]:
/// the nested `error.message` if the body has one, the HTTP status for other non-2xx replies,
/// or the parse error for 2xx replies.
pub fn decode_reply<R: DeserializeOwned>(reply: &HttpReply) -> ThetaResult<R> {
    let parse_err = match serde_json::from_str::<R>(&reply.body) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    if reply.is_success() {
        return Err(ThetaError::WebApi(format!(
            "Illegal response body, not valid JSON for this request: {parse_err}"
        )));
    }

    let nested = serde_json::from_str::<ErrorOnlyBody>(&reply.body)
        .ok()
        .and_then(|body| body.error)
        .map(|error| error.message)
        .filter(|message| !message.is_empty());

    match nested {
        Some(message) => Err(ThetaError::WebApi(message)),
        None => Err(ThetaError::WebApi(format!(
            "Camera responded with HTTP status {}",
            reply.status
        ))),
    }
}

/// Gets the error message of a response in the `error` state.
fn error_message<R>(response: &CommandResponse<R>) -> String {
    response
        .error
        .as_ref()
        .map(|error| {
            if error.code.is_empty() {
                error.message.clone()
            } else {
                format!("{} ({})", error.message, error.code)
            }
        })
        .unwrap_or_else(|| format!("{} failed without an error message", response.name))
}

/// Sends commands to the camera and interprets the `done` / `inProgress` / `error` envelope.
///
/// Nothing is retried. Exactly one command is expected to be in flight per camera.
pub struct CommandExecutor<T> {
    transport: T,
    poll_interval: Duration,
}

impl<T: Transport> CommandExecutor<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            poll_interval: consts::STATUS_POLL_INTERVAL,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn set_poll_interval(&mut self, interval: Duration) {
        self.poll_interval = interval;
    }

    fn to_json(body: &impl Serialize) -> ThetaResult<serde_json::Value> {
        serde_json::to_value(body).map_err(|e| ThetaError::NotConnected(e.to_string()))
    }

    /// Sends a GET request and decodes the body.
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> ThetaResult<R> {
        let reply = self.transport.get(path).await?;

        decode_reply(&reply)
    }

    /// Sends a POST request and decodes the body.
    pub async fn post<R: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> ThetaResult<R> {
        let reply = self.transport.post_json(path, Self::to_json(body)?).await?;

        decode_reply(&reply)
    }

    /// Sends a command and returns the raw envelope, whatever its state.
    pub async fn execute<P: Serialize, R: DeserializeOwned>(
        &self,
        name: &'static str,
        parameters: P,
    ) -> ThetaResult<CommandResponse<R>> {
        debug!("Executing {name}");

        self.post(
            consts::paths::COMMANDS_EXECUTE,
            &CommandRequest { name, parameters },
        )
        .await
    }

    /// Queries the state of an `inProgress` command.
    pub async fn status<R: DeserializeOwned>(&self, id: &str) -> ThetaResult<CommandResponse<R>> {
        debug!("Querying status of command {id}");

        self.post(consts::paths::COMMANDS_STATUS, &StatusRequest { id })
            .await
    }

    /// Sends a command which is expected to finish immediately and returns its results.
    ///
    /// A command still `inProgress` is reported as an error, such commands go through `execute_until_done`.
    pub async fn execute_done<P: Serialize, R: DeserializeOwned>(
        &self,
        name: &'static str,
        parameters: P,
    ) -> ThetaResult<Option<R>> {
        let response = self.execute::<P, R>(name, parameters).await?;

        match response.state {
            CommandState::Done => Ok(response.results),
            CommandState::Error => {
                let message = error_message(&response);
                warn!("{name} was rejected: {message}");
                Err(ThetaError::WebApi(message))
            }
            CommandState::InProgress => Err(ThetaError::WebApi(format!(
                "{name} is unexpectedly still in progress"
            ))),
        }
    }

    /// Like `execute_done`, but a missing `results` object is an error.
    pub async fn execute_results<P: Serialize, R: DeserializeOwned>(
        &self,
        name: &'static str,
        parameters: P,
    ) -> ThetaResult<R> {
        self.execute_done(name, parameters)
            .await?
            .ok_or_else(|| ThetaError::WebApi(format!("{name} returned no results")))
    }

    /// Sends `camera.setOptions`. Only the fields which are set are sent.
    pub async fn set_options(
        &self,
        options: &OptionsWire,
        session_id: Option<&str>,
    ) -> ThetaResult<()> {
        self.execute_done::<_, serde::de::IgnoredAny>(
            consts::commands::SET_OPTIONS,
            SetOptionsParams {
                session_id,
                options,
            },
        )
        .await?;

        Ok(())
    }

    /// Sends a parameterless command whose response body is a byte stream instead of an envelope.
    pub async fn execute_stream(&self, name: &'static str) -> ThetaResult<ByteStream> {
        debug!("Executing {name} (streamed)");

        let body = Self::to_json(&CommandRequest {
            name,
            parameters: NoParams {},
        })?;

        let reply = self
            .transport
            .post_stream(consts::paths::COMMANDS_EXECUTE, body)
            .await?;

        if !(200..300).contains(&reply.status) {
            warn!("{name} was rejected with HTTP status {}", reply.status);

            return Err(ThetaError::WebApi(format!(
                "{name} failed with HTTP status {}",
                reply.status
            )));
        }

        Ok(reply.body)
    }

    /// Sends a command and polls its status every poll interval until it is `done` or `error`.
    ///
    /// There is no overall timeout; polling ends only with a terminal state or a failed request.
    /// Cancelling the camera-side operation is a separate command, polling just observes its outcome.
    pub async fn execute_until_done<P: Serialize, R: DeserializeOwned>(
        &self,
        name: &'static str,
        parameters: P,
    ) -> ThetaResult<R> {
        let mut response = self.execute::<P, R>(name, parameters).await?;

        loop {
            match response.state {
                CommandState::Done => {
                    return response
                        .results
                        .ok_or_else(|| ThetaError::WebApi(format!("{name} returned no results")));
                }
                CommandState::Error => {
                    let message = error_message(&response);
                    warn!("{name} failed: {message}");
                    return Err(ThetaError::WebApi(message));
                }
                CommandState::InProgress => {
                    let id = response.id.clone().ok_or_else(|| {
                        ThetaError::WebApi(format!("{name} is in progress but has no id"))
                    })?;

                    if let Some(completion) = response.progress.as_ref().and_then(|p| p.completion) {
                        debug!("{name} ({id}) completion: {completion}");
                    }

                    tokio::time::sleep(self.poll_interval).await;

                    response = self.status(&id).await?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::StartSessionResults;

    fn reply(status: u16, body: &str) -> HttpReply {
        HttpReply {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn decodes_done_envelope() {
        let response: CommandResponse<StartSessionResults> = decode_reply(&reply(
            200,
            r#"{"name":"camera.startSession","state":"done","results":{"sessionId":"SID_0001","timeout":180}}"#,
        ))
        .unwrap();

        assert_eq!(response.state, CommandState::Done);
        assert_eq!(response.results.unwrap().session_id, "SID_0001");
    }

    #[test]
    fn error_envelope_with_error_status_is_still_decoded() {
        let response: CommandResponse<serde_json::Value> = decode_reply(&reply(
            400,
            r#"{"name":"camera.setOptions","state":"error","error":{"code":"invalidParameterValue","message":"bad iso"}}"#,
        ))
        .unwrap();

        assert_eq!(response.state, CommandState::Error);
        assert_eq!(error_message(&response), "bad iso (invalidParameterValue)");
    }

    #[test]
    fn non_json_success_mentions_illegal_json() {
        let err = decode_reply::<CommandResponse<serde_json::Value>>(&reply(200, "<html>hello</html>"))
            .unwrap_err();

        assert!(matches!(err, ThetaError::WebApi(_)));
        let message = err.to_string().to_lowercase();
        assert!(message.contains("json") || message.contains("illegal"));
    }

    #[test]
    fn non_json_error_status_mentions_status() {
        let err = decode_reply::<CommandResponse<serde_json::Value>>(&reply(503, "Service Unavailable"))
            .unwrap_err();

        assert!(matches!(err, ThetaError::WebApi(_)));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn nested_error_message_is_preferred() {
        let err = decode_reply::<CommandResponse<serde_json::Value>>(&reply(
            500,
            r#"{"error":{"code":"unexpected","message":"Camera is busy"}}"#,
        ))
        .unwrap_err();

        assert_eq!(err.to_string(), "Camera returned an error: Camera is busy");
    }

    #[test]
    fn error_without_payload() {
        let response: CommandResponse<serde_json::Value> =
            decode_reply(&reply(200, r#"{"name":"camera.reset","state":"error"}"#)).unwrap();

        assert_eq!(error_message(&response), "camera.reset failed without an error message");
    }
}
