//! Bouncing-ball demo application
//!
//! Spawns a single actor with a circle-outline drawable and a behavior
//! that bounces it around the window. Escape or closing the window quits.

use engine2d::prelude::*;

const BALL_RADIUS: i32 = 50;
const BALL_SPEED: f32 = 180.0; // pixels per second

struct BounceBehavior {
    velocity: Vec2,
    bounds: Vec2,
}

impl ActorBehavior for BounceBehavior {
    fn update(&mut self, actor: &mut Actor, _ctx: &mut UpdateContext, dt: f32) {
        let mut position = actor.position() + self.velocity * dt;
        let radius = BALL_RADIUS as f32;

        if position.x < radius || position.x > self.bounds.x - radius {
            self.velocity.x = -self.velocity.x;
            position.x = position.x.clamp(radius, self.bounds.x - radius);
        }
        if position.y < radius || position.y > self.bounds.y - radius {
            self.velocity.y = -self.velocity.y;
            position.y = position.y.clamp(radius, self.bounds.y - radius);
        }

        actor.set_position(position);
    }
}

struct BallApp {
    bounds: Vec2,
}

impl Application for BallApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let mut ball = Actor::with_behavior(Box::new(BounceBehavior {
            velocity: Vec2::new(BALL_SPEED, BALL_SPEED * 0.75),
            bounds: self.bounds,
        }));
        ball.set_position(Vec2::new(100.0, 100.0));
        ball.add_component(Box::new(DrawCircleComponent::new(BALL_RADIUS)));
        engine.spawn(ball);

        log::info!("Ball spawned at (100, 100) with radius {BALL_RADIUS}");
        Ok(())
    }

    fn cleanup(&mut self, _engine: &mut Engine) {
        log::info!("Ball demo shutting down");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting ball demo");

    let config = EngineConfig {
        window: WindowConfig {
            title: "Ball Demo".to_string(),
            width: 800,
            height: 600,
        },
    };
    let mut app = BallApp {
        bounds: Vec2::new(config.window.width as f32, config.window.height as f32),
    };
    Engine::run(&config, &mut app)?;
    Ok(())
}
