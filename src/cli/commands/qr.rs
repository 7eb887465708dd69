use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::qr::{get_or_create_config, payload_for, regenerate_secret, set_enabled};
use crate::ui::messages::success;

/// Handle the `qr` command: show/rotate/enable/disable a gym's credential.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Qr {
        gym,
        show,
        rotate,
        enable,
        disable,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *rotate {
            let qr_cfg = regenerate_secret(&pool.conn, gym)?;
            success(format!(
                "QR secret regenerated for gym {} (rotated at {}). All previously printed codes are now invalid.",
                gym, qr_cfg.last_rotated_at
            ));
        }

        if *enable {
            set_enabled(&pool.conn, gym, true)?;
            success(format!("QR scans enabled for gym {}.", gym));
        }

        if *disable {
            set_enabled(&pool.conn, gym, false)?;
            success(format!("QR scans disabled for gym {}.", gym));
        }

        // Default action: plain `qr <gym>` behaves like --show.
        if *show || (!rotate && !enable && !disable) {
            let qr_cfg = get_or_create_config(&pool.conn, gym)?;
            println!("Gym:     {}", qr_cfg.gym_id);
            println!("Enabled: {}", qr_cfg.is_enabled);
            println!("Rotated: {}", qr_cfg.last_rotated_at);
            println!("Payload: {}", payload_for(&qr_cfg)?);
        }
    }

    Ok(())
}
