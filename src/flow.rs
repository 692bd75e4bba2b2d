//! Flow control and application event loop.
//!
//! A "flow" is a self-contained scene: it reacts to input, advances its own
//! state once per frame and describes what to draw. The engine owns the
//! window and GPU context, forwards events to every flow and renders the
//! batched output of all of them.
//!
//! # User-facing types
//!
//! - [`GraphicsFlow<E>`] is the trait for scenes that handle events and rendering
//! - [`Out<E>`] is the output type for async event handling and context configuration
//! - [`StopSignal`] ends the loop from anywhere
//!
//! # Lifecycle Flow
//!
//! The event loop follows this pattern each frame:
//! 1. Collect window events and distribute them to all flows
//! 2. Check the stop signal
//! 3. Advance every flow with the next [`FrameInput`]
//! 4. Step the orbit controller and upload the camera
//! 5. Collect every flow's [`Render`] and draw the batches
//! 6. Present the frame and request the next one

use std::{fmt::Debug, iter, pin::Pin, sync::Arc};

use wgpu::WasmNotSend;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    context::{Context, InitContext, scale_to_max},
    data_structures::{model::DrawModel, texture::Texture},
    render::{Batches, Render},
    schedule::{FrameInput, FrameTicker, SteadyClock},
};

pub use crate::schedule::StopSignal;

///
/// This is the Output Type for every lifecycle hook where the user can pass async events that are
/// handled according to the platform you're running on.
///
/// `Out::FutEvent` can be used to resolve a future of an Event that is put in the Event Queue after
/// being resolved. The event reaches the flows through `on_custom_events`. Natively the futures
/// run on the tokio runtime, so the window keeps drawing while they are pending.
///
/// `Out::Configure` can be used to modify the Context during runtime for instance to change the
/// projection or the clear colour.
///
/// `Empty` is the default output used when no eventing/futures need to be handled.
///
pub enum Out<E> {
    FutEvent(Vec<EventFuture<E>>),
    Configure(Box<dyn FnOnce(&mut Context)>),
    Empty,
}

/// A future resolving to a flow event.
#[cfg(not(target_arch = "wasm32"))]
pub type EventFuture<E> = Pin<Box<dyn Future<Output = E> + Send>>;
/// A future resolving to a flow event.
#[cfg(target_arch = "wasm32")]
pub type EventFuture<E> = Pin<Box<dyn Future<Output = E>>>;

impl<E> Default for Out<E> {
    fn default() -> Self {
        Self::Empty
    }
}

/// Trait for implementing a renderable scene.
///
/// # Lifecycle
///
/// 1. `on_init()` is called once when the flow is created; configure context (camera, clear color, etc.)
/// 2. `on_window_events()` is called for each winit window event
/// 3. `on_update()` is called every frame before rendering
/// 4. `on_custom_events()` is called for custom application events
/// 5. `on_render()` is called each frame and specifies how to render `self`
///
pub trait GraphicsFlow<E> {
    /// Initialize the flow and configure the context.
    fn on_init(&mut self, ctx: &mut Context) -> Out<E>;

    /// Advance the flow by one frame.
    fn on_update(&mut self, ctx: &Context, frame: &FrameInput) -> Out<E>;

    /// Handle window events (mouse, window resizing, etc.).
    fn on_window_events(&mut self, ctx: &Context, event: &WindowEvent) -> Out<E>;

    /// Handle custom application events.
    ///
    /// Returns the event if it was not consumed, allowing it to be passed to
    /// the next flow. Returning `None` means the event was consumed.
    fn on_custom_events(&mut self, ctx: &Context, event: E) -> Option<E>;

    /// Return renderable objects for this flow.
    fn on_render(&self) -> Render<'_>;
}

impl<Event> Debug for dyn GraphicsFlow<Event> + 'static {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GraphicsFlow")
    }
}

/// A flow factory: takes an [`InitContext`] and asynchronously returns a
/// boxed [`GraphicsFlow`].
pub type FlowConstructor<E> =
    Box<dyn FnOnce(InitContext) -> Pin<Box<dyn Future<Output = Box<dyn GraphicsFlow<E>>>>>>;

/// GPU context plus surface status.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let ctx = Context::new(window).await?;
        Ok(Self {
            ctx,
            is_surface_configured: false,
        })
    }

    /// Reconfigure the surface and depth buffer for a `width` x `height` output,
    /// scaled down to the device's texture limit.
    /// Zero-sized requests (minimized windows) are ignored.
    fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        let max_dim = self.ctx.device.limits().max_texture_dimension_2d;
        let (width, height) = scale_to_max((width, height), max_dim);
        self.ctx.config.width = width;
        self.ctx.config.height = height;
        self.is_surface_configured = true;
        self.ctx.surface.configure(&self.ctx.device, &self.ctx.config);
        self.ctx.depth_texture = Texture::create_depth_texture(
            &self.ctx.device,
            [self.ctx.config.width, self.ctx.config.height],
            "depth_texture",
        );
        true
    }

    fn render<Event>(
        &mut self,
        graphics_flows: &[Box<dyn GraphicsFlow<Event>>],
    ) -> Result<(), wgpu::SurfaceError> {
        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut batches = Batches::default();
        graphics_flows
            .iter()
            .for_each(|flow| flow.on_render().set_pipelines(&mut batches));

        let ctx = &self.ctx;
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&ctx.pipelines.normal);
            for instanced in batches.normals {
                if instanced.amount == 0 || instanced.mesh.num_elements == 0 {
                    continue;
                }
                render_pass.set_vertex_buffer(1, instanced.instance.slice(..));
                render_pass.draw_mesh_instanced(
                    instanced.mesh,
                    0..instanced.amount as u32,
                    &ctx.camera.bind_group,
                    &ctx.lights.bind_group,
                );
            }

            render_pass.set_pipeline(&ctx.pipelines.standard);
            for lit in batches.standards {
                let instanced = lit.instanced;
                if instanced.amount == 0 || instanced.mesh.num_elements == 0 {
                    continue;
                }
                render_pass.set_bind_group(2, lit.material, &[]);
                render_pass.set_vertex_buffer(1, instanced.instance.slice(..));
                render_pass.draw_mesh_instanced(
                    instanced.mesh,
                    0..instanced.amount as u32,
                    &ctx.camera.bind_group,
                    &ctx.lights.bind_group,
                );
            }

            render_pass.set_pipeline(&ctx.pipelines.points);
            for points in batches.points {
                if points.cloud.amount == 0 {
                    continue;
                }
                render_pass.set_bind_group(0, &ctx.camera.bind_group, &[]);
                render_pass.set_bind_group(1, &points.cloud.bind_group, &[]);
                render_pass.set_vertex_buffer(0, points.cloud.instance_buffer.slice(..));
                render_pass.draw(0..6, 0..points.cloud.amount);
            }
        }

        ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub struct App<Event: 'static> {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    proxy: winit::event_loop::EventLoopProxy<FlowEvent<Event>>,
    state: Option<AppState>,
    // This will hold the fully initialized flows once they are ready.
    graphics_flows: Vec<Box<dyn GraphicsFlow<Event>>>,
    // Taken once the window exists.
    constructors: Option<Vec<FlowConstructor<Event>>>,
    ticker: FrameTicker<SteadyClock>,
    stop: StopSignal,
}

impl<Event: WasmNotSend + 'static> App<Event> {
    fn new(
        event_loop: &EventLoop<FlowEvent<Event>>,
        constructors: Vec<FlowConstructor<Event>>,
        stop: StopSignal,
    ) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new()?,
            proxy,
            state: None,
            graphics_flows: Vec::new(),
            constructors: Some(constructors),
            ticker: FrameTicker::new(SteadyClock::new()),
            stop,
        })
    }

    fn dispatch(&mut self, out: Out<Event>) {
        if let Some(state) = &mut self.state {
            handle_flow_output(
                #[cfg(not(target_arch = "wasm32"))]
                &self.async_runtime,
                &mut state.ctx,
                self.proxy.clone(),
                out,
            );
        }
    }

    fn init_flows(&mut self) {
        let Some(state) = &mut self.state else {
            return;
        };
        let outs: Vec<_> = self
            .graphics_flows
            .iter_mut()
            .map(|flow| flow.on_init(&mut state.ctx))
            .collect();
        outs.into_iter().for_each(|out| self.dispatch(out));
    }
}

pub(crate) enum FlowEvent<Event: 'static> {
    /// The window and flows finished setting up on the web.
    #[cfg(target_arch = "wasm32")]
    Initialized {
        state: AppState,
        flows: Vec<Box<dyn GraphicsFlow<Event>>>,
    },
    Custom(Event),
}

impl<Event> Debug for FlowEvent<Event> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(target_arch = "wasm32")]
            Self::Initialized { state: _, flows } => {
                f.debug_struct("Initialized").field("flows", flows).finish()
            }
            Self::Custom(_) => f.write_str("Custom(E)"),
        }
    }
}

/// Report a failure that makes the page unusable.
///
/// On the web this is an exception in the host; natively the loop exits.
fn fatal(event_loop: &ActiveEventLoop, err: &anyhow::Error) {
    log::error!("{:#}", err);
    #[cfg(target_arch = "wasm32")]
    wasm_bindgen::throw_str(&format!("{:#}", err));
    #[cfg(not(target_arch = "wasm32"))]
    event_loop.exit();
}

impl<Event: WasmNotSend + 'static> ApplicationHandler<FlowEvent<Event>> for App<Event> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(constructors) = self.constructors.take() else {
            return;
        };

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title("folio3d");

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::WindowAttributesExtWebSys;

            match crate::page::mount_canvas(crate::page::SCENE_CONTAINER_ID) {
                Ok(canvas) => {
                    window_attributes = window_attributes.with_canvas(Some(canvas));
                }
                Err(e) => return fatal(event_loop, &e.into()),
            }
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return fatal(event_loop, &e.into()),
        };

        let init_future = async move {
            let app_state = AppState::new(window).await?;
            let flow_futures: Vec<_> = constructors
                .into_iter()
                .map(|constructor| constructor((&app_state.ctx).into()))
                .collect();
            let flows: Vec<_> = futures::future::join_all(flow_futures).await;
            anyhow::Ok((app_state, flows))
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(init_future) {
                Ok((mut app_state, flows)) => {
                    let size = app_state.ctx.window.inner_size();
                    app_state.resize(size.width, size.height);
                    self.graphics_flows = flows;
                    app_state.ctx.window.request_redraw();
                    self.state = Some(app_state);
                    self.init_flows();
                }
                Err(e) => fatal(event_loop, &e),
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match init_future.await {
                    Ok((state, flows)) => {
                        if proxy
                            .send_event(FlowEvent::Initialized { state, flows })
                            .is_err()
                        {
                            log::error!("event loop closed before the scene was ready");
                        }
                    }
                    Err(e) => wasm_bindgen::throw_str(&format!("{:#}", e)),
                }
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: FlowEvent<Event>) {
        match event {
            #[cfg(target_arch = "wasm32")]
            FlowEvent::Initialized { mut state, flows } => {
                // This is the message from our wasm `spawn_local`
                let size = state.ctx.window.inner_size();
                state.resize(size.width, size.height);
                self.graphics_flows = flows;
                self.state = Some(state);
                self.init_flows();
                if let Some(state) = &self.state {
                    state.ctx.window.request_redraw();
                }
            }
            FlowEvent::Custom(custom_event) => {
                if let Some(state) = &mut self.state {
                    let result = self
                        .graphics_flows
                        .iter_mut()
                        .fold(Some(custom_event), |event, flow| {
                            flow.on_custom_events(&state.ctx, event?)
                        });
                    if result.is_some() {
                        log::warn!("Custom event was not consumed this cycle");
                    }
                    state.ctx.window.request_redraw();
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        state.ctx.camera.controller.handle_window_events(&event);

        let outs: Vec<_> = self
            .graphics_flows
            .iter_mut()
            .map(|f| f.on_window_events(&state.ctx, &event))
            .collect();
        outs.into_iter().for_each(|out| self.dispatch(out));

        let Some(state) = &mut self.state else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if !state.resize(size.width, size.height) {
                    log::debug!("ignoring resize to {}x{}", size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if self.stop.is_stopped() {
                    log::info!("stop requested, leaving the render loop");
                    event_loop.exit();
                    return;
                }

                let frame = self.ticker.tick();
                let outs: Vec<_> = self
                    .graphics_flows
                    .iter_mut()
                    .map(|f| f.on_update(&state.ctx, &frame))
                    .collect();
                state.ctx.update_camera();

                match state.render(&self.graphics_flows) {
                    Ok(()) => (),
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
                // Cadence is left to the host: one frame per redraw request.
                state.ctx.window.request_redraw();
                outs.into_iter().for_each(|out| self.dispatch(out));
            }
            _ => {}
        }
    }
}

fn handle_flow_output<Event: WasmNotSend + 'static>(
    #[cfg(not(target_arch = "wasm32"))] async_runtime: &tokio::runtime::Runtime,
    ctx: &mut Context,
    proxy: winit::event_loop::EventLoopProxy<FlowEvent<Event>>,
    out: Out<Event>,
) {
    match out {
        // Send the events passed by the user to winit
        Out::FutEvent(futures) => {
            let fut = futures::future::join_all(futures);
            #[cfg(not(target_arch = "wasm32"))]
            {
                // Detached: the result comes back through the proxy.
                let _task = async_runtime.spawn(async move {
                    for event in fut.await {
                        if let Err(err) = proxy.send_event(FlowEvent::Custom(event)) {
                            log::error!("Event loop was closed before all events could be processed: {}", err);
                        }
                    }
                });
            }

            #[cfg(target_arch = "wasm32")]
            {
                wasm_bindgen_futures::spawn_local(async move {
                    let resolved = fut.await;
                    for event in resolved {
                        if proxy.send_event(FlowEvent::Custom(event)).is_err() {
                            log::error!("Event loop was closed before all events could be processed");
                        }
                    }
                });
            }
        }
        Out::Configure(f) => f(ctx),
        Out::Empty => (),
    }
}

fn init_logger() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            eprintln!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        if console_log::init_with_level(log::Level::Info).is_err() {
            log::warn!("logger was already initialized");
        }
    }
}

/// Run `constructors` until the window closes.
pub fn run<Event: WasmNotSend + 'static>(constructors: Vec<FlowConstructor<Event>>) -> anyhow::Result<()> {
    run_until(constructors, StopSignal::new())
}

/// Run `constructors` until the window closes or `stop` is raised.
pub fn run_until<Event: WasmNotSend + 'static>(
    constructors: Vec<FlowConstructor<Event>>,
    stop: StopSignal,
) -> anyhow::Result<()> {
    init_logger();

    let event_loop: EventLoop<FlowEvent<Event>> = EventLoop::with_user_event().build()?;
    let app: App<Event> = App::new(&event_loop, constructors, stop)?;

    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut app = app;
        event_loop.run_app(&mut app)?;
    }

    #[cfg(target_arch = "wasm32")]
    {
        use winit::platform::web::EventLoopExtWebSys;
        event_loop.spawn_app(app);
    }

    Ok(())
}
