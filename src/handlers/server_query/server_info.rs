//! VERSION, TIME, ADMIN and INFO handlers.

use chrono::Local;
use dualirc_proto::Numeric;
use dualirc_proto::command::TargetArgs;

use super::check_target;
use crate::handlers::{Context, Handler, HandlerResult};

/// Handler for VERSION command.
///
/// `VERSION [target]`
pub struct VersionHandler;

impl Handler for VersionHandler {
    type Args = TargetArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: TargetArgs) -> HandlerResult {
        check_target(ctx, &args)?;
        let server = &ctx.matrix.server;
        // RPL_VERSION (351): <version> <server> :<comments>
        ctx.reply(
            ctx.numeric(Numeric::RPL_VERSION)
                .params([server.version.as_str(), server.name.as_str()])
                .text(&ctx.config().server.comments),
        );
        Ok(())
    }
}

/// Handler for TIME command.
pub struct TimeHandler;

impl Handler for TimeHandler {
    type Args = TargetArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: TargetArgs) -> HandlerResult {
        check_target(ctx, &args)?;
        ctx.reply(
            ctx.numeric(Numeric::RPL_TIME)
                .param(ctx.server_name())
                .text(Local::now().to_rfc2822()),
        );
        Ok(())
    }
}

/// Handler for ADMIN command.
pub struct AdminHandler;

impl Handler for AdminHandler {
    type Args = TargetArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: TargetArgs) -> HandlerResult {
        check_target(ctx, &args)?;
        let admin = &ctx.config().admin;
        ctx.reply(ctx.numeric(Numeric::RPL_ADMINME).param(ctx.server_name()));
        ctx.reply(ctx.numeric(Numeric::RPL_ADMINLOC1).text(&admin.location1));
        ctx.reply(ctx.numeric(Numeric::RPL_ADMINLOC2).text(&admin.location2));
        ctx.reply(ctx.numeric(Numeric::RPL_ADMINEMAIL).text(&admin.email));
        Ok(())
    }
}

/// Handler for INFO command.
pub struct InfoHandler;

impl Handler for InfoHandler {
    type Args = TargetArgs;

    fn handle(&self, ctx: &mut Context<'_>, args: TargetArgs) -> HandlerResult {
        check_target(ctx, &args)?;
        let info = &ctx.config().server.info;
        if info.is_empty() {
            ctx.reply(ctx.numeric(Numeric::RPL_INFO).text(&ctx.matrix.server.version));
        }
        for line in info {
            ctx.reply(ctx.numeric(Numeric::RPL_INFO).text(line));
        }
        ctx.reply(ctx.numeric(Numeric::RPL_ENDOFINFO));
        Ok(())
    }
}
