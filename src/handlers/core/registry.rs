//! Command handler registry and dispatch.

use dualirc_proto::Command;
use tracing::debug;

use super::context::Context;
use super::traits::Handler;
use crate::error::HandlerError;
use crate::handlers::{
    channel::{
        InviteHandler, JoinHandler, KickHandler, ListHandler, NamesHandler, PartHandler,
        TopicHandler,
    },
    connection::{NickHandler, PingHandler, PongHandler, QuitHandler, UserHandler},
    messaging::{NoticeHandler, PrivmsgHandler},
    mode::ModeHandler,
    oper::{KillHandler, OperHandler, WallopsHandler},
    server_query::{
        AdminHandler, InfoHandler, LusersHandler, MotdHandler, TimeHandler, VersionHandler,
    },
    user_query::{IsonHandler, UserhostHandler, WhoHandler, WhoisHandler},
    user_status::AwayHandler,
};
use crate::telemetry::{CommandTimer, spans};

/// Routes commands to handlers.
#[derive(Debug, Default)]
pub struct Registry {
    dispatched: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands dispatched so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Dispatch a command to the appropriate handler.
    pub fn dispatch(&mut self, ctx: &mut Context<'_>, command: Command) {
        self.dispatched += 1;
        let name = command.name();
        match command {
            Command::Nick(args) => run(name, &NickHandler, ctx, args),
            Command::User(args) => run(name, &UserHandler, ctx, args),
            Command::Ping(args) => run(name, &PingHandler, ctx, args),
            Command::Pong(args) => run(name, &PongHandler, ctx, args),
            Command::Quit(args) => run(name, &QuitHandler, ctx, args),

            Command::Join(args) => run(name, &JoinHandler, ctx, args),
            Command::Part(args) => run(name, &PartHandler, ctx, args),
            Command::Topic(args) => run(name, &TopicHandler, ctx, args),
            Command::Names(args) => run(name, &NamesHandler, ctx, args),
            Command::List(args) => run(name, &ListHandler, ctx, args),
            Command::Kick(args) => run(name, &KickHandler, ctx, args),
            Command::Invite(args) => run(name, &InviteHandler, ctx, args),
            Command::Mode(args) => run(name, &ModeHandler, ctx, args),

            Command::Privmsg(args) => run(name, &PrivmsgHandler, ctx, args),
            Command::Notice(args) => run(name, &NoticeHandler, ctx, args),

            Command::Whois(args) => run(name, &WhoisHandler, ctx, args),
            Command::Who(args) => run(name, &WhoHandler, ctx, args),
            Command::Ison(args) => run(name, &IsonHandler, ctx, args),
            Command::Userhost(args) => run(name, &UserhostHandler, ctx, args),
            Command::Away(args) => run(name, &AwayHandler, ctx, args),

            Command::Oper(args) => run(name, &OperHandler, ctx, args),
            Command::Kill(args) => run(name, &KillHandler, ctx, args),
            Command::Wallops(args) => run(name, &WallopsHandler, ctx, args),

            Command::Motd(args) => run(name, &MotdHandler, ctx, args),
            Command::Lusers(args) => run(name, &LusersHandler, ctx, args),
            Command::Version(args) => run(name, &VersionHandler, ctx, args),
            Command::Time(args) => run(name, &TimeHandler, ctx, args),
            Command::Admin(args) => run(name, &AdminHandler, ctx, args),
            Command::Info(args) => run(name, &InfoHandler, ctx, args),
        }
    }
}

fn run<H: Handler>(name: &'static str, handler: &H, ctx: &mut Context<'_>, args: H::Args) {
    let span = spans::command(name, ctx.uid, &ctx.nick());
    let _enter = span.enter();
    let _timer = CommandTimer::new(name);

    if H::NEEDS_REGISTRATION && !ctx.is_registered() {
        ctx.send_error(&HandlerError::NotRegistered);
        return;
    }

    if let Err(e) = handler.handle(ctx, args) {
        debug!(command = name, error = %e, code = e.error_code(), "command error");
        ctx.send_error(&e);
    }
}
