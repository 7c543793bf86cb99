//! Routes host commands to the [`LedgerService`].

use serde::Serialize;
use serde_json::{Value, json};

use super::command::{CommandResponse, INTERNAL_ERROR, LedgerCommand, parse_command};
use crate::error::ErrorResponse;
use crate::service::LedgerService;

/// Parses and executes one input line, always producing a response.
pub async fn handle_line(service: &LedgerService, line: &str) -> CommandResponse {
    match parse_command(line) {
        Ok(command) => dispatch(service, command).await,
        Err(error) => {
            tracing::warn!(code = error.code, "malformed command line");
            CommandResponse::failure(error)
        }
    }
}

/// Executes a parsed command against the service.
pub async fn dispatch(service: &LedgerService, command: LedgerCommand) -> CommandResponse {
    match execute(service, command).await {
        Ok(result) => CommandResponse::success(result),
        Err(error) => CommandResponse::failure(error),
    }
}

async fn execute(service: &LedgerService, command: LedgerCommand) -> Result<Value, ErrorResponse> {
    match command {
        LedgerCommand::SetEntranceFee { caller, amount } => {
            service.set_entrance_fee(caller, amount).await?;
            Ok(json!({ "entrance_fee": amount.to_string() }))
        }
        LedgerCommand::AddParticipant { participant, name } => {
            service.add_participant(participant, &name).await?;
            Ok(json!({ "participant": participant, "name": name, "number_of_votes": 0 }))
        }
        LedgerCommand::AddVote {
            voter,
            participant,
            value,
        } => {
            let record = service.add_vote(voter, participant, value).await?;
            to_json(&record)
        }
        LedgerCommand::EndOfBola1 { winner } => {
            let settlement = service.end_of_bola1(winner).await?;
            to_json(&settlement)
        }
        LedgerCommand::Withdraw { account } => {
            let amount = service.withdraw(account).await?;
            Ok(json!({ "account": account, "amount": amount.to_string() }))
        }
        LedgerCommand::EntranceFee => {
            let fee = service.entrance_fee().await;
            Ok(json!({ "entrance_fee": fee.to_string() }))
        }
        LedgerCommand::Participant { participant } => {
            // Unknown participants read as an empty record, like a mapping
            // lookup would.
            let found = service.participant(participant).await;
            let (name, votes) = found.map_or((String::new(), 0), |p| (p.name, p.number_of_votes));
            Ok(json!({ "participant": participant, "name": name, "number_of_votes": votes }))
        }
        LedgerCommand::Balance { account } => {
            let balance = service.balance_of(account).await;
            Ok(json!({ "account": account, "balance": balance.to_string() }))
        }
        LedgerCommand::Pool { participant } => {
            let pool = service.pool_of(participant).await;
            Ok(json!({ "participant": participant, "pool": pool.to_string() }))
        }
        LedgerCommand::Snapshot => to_json(&service.snapshot().await),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, ErrorResponse> {
    serde_json::to_value(value).map_err(|e| ErrorResponse {
        code: INTERNAL_ERROR,
        message: format!("failed to encode result: {e}"),
    })
}
